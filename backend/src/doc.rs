//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the registration and health endpoints together with
//! the account view and error envelope schemas. Swagger UI serves it in debug
//! builds, and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{AccountPublicView, Error, ErrorCode};
use crate::inbound::http::users::RegisterAccountBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Noteful accounts API",
        description = "Account registration and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_account,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(RegisterAccountBody, AccountPublicView, Error, ErrorCode)),
    tags(
        (name = "users", description = "Account registration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
