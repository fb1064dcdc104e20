//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see domain
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::AccountRegistration;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::AccountRegistrationService;
/// use backend::inbound::http::state::HttpState;
/// use backend::outbound::credentials::{Argon2CredentialHasher, HashingCost};
/// use backend::outbound::memory::InMemoryAccountRepository;
///
/// let hasher = Argon2CredentialHasher::new(HashingCost::default()).expect("valid cost");
/// let service = AccountRegistrationService::new(
///     Arc::new(InMemoryAccountRepository::new()),
///     Arc::new(hasher),
/// );
/// let state = HttpState::new(Arc::new(service));
/// let _registration = state.registration.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn AccountRegistration>,
}

impl HttpState {
    pub fn new(registration: Arc<dyn AccountRegistration>) -> Self {
        Self { registration }
    }
}
