//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! `insert_unique` is a single `INSERT ... RETURNING`. The unique constraint
//! on `accounts.username` arbitrates concurrent registrations; a violation
//! becomes [`AccountPersistenceError::DuplicateUsername`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, AccountId, CredentialHash, FullName, Username};

use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Name of the unique constraint guarding `accounts.username`.
pub(crate) const USERNAME_CONSTRAINT: &str = "accounts_username_key";

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    AccountPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: DieselError) -> AccountPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => AccountPersistenceError::query("database query error"),
        _ => AccountPersistenceError::query("database error"),
    }
}

fn map_insert_error(error: DieselError, username: &Username) -> AccountPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        if info.constraint_name() == Some(USERNAME_CONSTRAINT) {
            return AccountPersistenceError::duplicate_username(username.as_str());
        }
    }
    map_diesel_error(error)
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountPersistenceError> {
    let username = Username::new(row.username)
        .map_err(|err| AccountPersistenceError::query(format!("stored username invalid: {err}")))?;
    let password_hash = CredentialHash::from_encoded(row.password_hash)
        .map_err(|err| AccountPersistenceError::query(format!("stored hash invalid: {err}")))?;
    Ok(Account::new(
        AccountId::from_uuid(row.id),
        username,
        FullName::new(row.full_name),
        password_hash,
    ))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert_unique(&self, account: &Account) -> Result<Account, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAccountRow {
            id: *account.id().as_uuid(),
            username: account.username().as_str(),
            full_name: account.full_name().as_str(),
            password_hash: account.password_hash().as_str(),
        };

        let row: AccountRow = diesel::insert_into(accounts::table)
            .values(&new_row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, account.username()))?;

        row_to_account(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::username.eq(username.as_str()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }
}
