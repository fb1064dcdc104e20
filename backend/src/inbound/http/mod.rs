//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;

/// Upper bound for JSON request bodies, in bytes.
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// JSON extractor configuration shared by every JSON endpoint.
///
/// Unreadable bodies become `invalid_request` errors instead of Actix's
/// plain-text defaults.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(error::json_error_handler)
}

/// Register the `/api` routes.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .app_data(json_config())
        .service(users::register_account)
}
