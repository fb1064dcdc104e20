//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Account, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Another account already holds the username.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Storage for registered accounts.
///
/// Implementations must make [`AccountRepository::insert_unique`] atomic with
/// respect to username uniqueness: of any number of concurrent inserts for the
/// same username, exactly one succeeds and the rest observe
/// [`AccountPersistenceError::DuplicateUsername`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account, failing if the username is taken.
    async fn insert_unique(&self, account: &Account) -> Result<Account, AccountPersistenceError>;

    /// Fetch an account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountPersistenceError>;
}
