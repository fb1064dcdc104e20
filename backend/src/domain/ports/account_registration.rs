//! Driving port for the create-account use-case.
//!
//! Inbound adapters call it with raw request fields; validation, hashing, and
//! persistence stay behind the port so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AccountPublicView, AccountRequest, Error};

/// Domain use-case port for registering accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistration: Send + Sync {
    /// Validate the request, store the account, and return its public view.
    async fn register(&self, request: AccountRequest) -> Result<AccountPublicView, Error>;
}
