//! In-process account repository.
//!
//! Used when no database is configured and as the persistence double in
//! tests. Uniqueness is enforced under a single mutex, so concurrent inserts
//! for one username resolve to exactly one winner.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, Username};

/// Account store backed by a `HashMap` keyed on username.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> Result<usize, AccountPersistenceError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AccountPersistenceError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Account>>, AccountPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| AccountPersistenceError::connection("account store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert_unique(&self, account: &Account) -> Result<Account, AccountPersistenceError> {
        let mut accounts = self.lock()?;
        match accounts.entry(account.username().as_str().to_owned()) {
            Entry::Occupied(entry) => Err(AccountPersistenceError::duplicate_username(
                entry.key().as_str(),
            )),
            Entry::Vacant(entry) => Ok(entry.insert(account.clone()).clone()),
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self.lock()?.get(username.as_str()).cloned())
    }
}
