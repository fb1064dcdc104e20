//! Backend entry-point: loads settings, wires adapters, and serves the API.

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use backend::settings::AppSettings;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut config = ServerConfig::new(bind_addr, settings.hashing_cost());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(database_url, &settings).await?);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(make_metrics()?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}

/// Apply pending migrations, then open the connection pool.
async fn connect_database(
    database_url: &str,
    settings: &AppSettings,
) -> std::io::Result<DbPool> {
    let applied = apply_migrations(database_url.to_owned())
        .await
        .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
    info!(applied, "database migrations applied");

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("noteful")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("failed to configure Prometheus metrics: {e}")))
}
