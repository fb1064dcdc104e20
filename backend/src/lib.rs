//! Account registration backend.
//!
//! Hexagonal layout: `domain` holds the registration rules and ports,
//! `inbound` the HTTP adapter, and `outbound` the credential hasher and
//! account stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
