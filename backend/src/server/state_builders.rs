//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use backend::domain::AccountRegistrationService;
use backend::domain::ports::AccountRegistration;
use backend::inbound::http::state::HttpState;
use backend::outbound::credentials::Argon2CredentialHasher;
use backend::outbound::memory::InMemoryAccountRepository;
use backend::outbound::persistence::DieselAccountRepository;

use super::ServerConfig;

/// Build the registration use-case over the configured account store.
///
/// Uses the Diesel repository when a pool is configured and the in-memory
/// store otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when the hashing cost is rejected by Argon2.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let hasher = Argon2CredentialHasher::new(config.hashing_cost)
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let hasher = Arc::new(hasher);

    let registration: Arc<dyn AccountRegistration> = match &config.db_pool {
        Some(pool) => {
            info!("storing accounts in PostgreSQL");
            Arc::new(AccountRegistrationService::new(
                Arc::new(DieselAccountRepository::new(pool.clone())),
                hasher,
            ))
        }
        None => {
            warn!("no database configured; accounts are kept in memory and lost on exit");
            Arc::new(AccountRegistrationService::new(
                Arc::new(InMemoryAccountRepository::new()),
                hasher,
            ))
        }
    };

    Ok(web::Data::new(HttpState::new(registration)))
}
