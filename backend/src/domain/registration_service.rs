//! Account registration domain service.
//!
//! Implements the [`AccountRegistration`] driving port by composing request
//! validation, credential derivation, and an atomic unique insert. Username
//! uniqueness is decided by the repository alone; there is no pre-insert
//! existence check.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::task;
use tracing::{debug, error, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountPersistenceError, AccountRegistration, AccountRepository, CredentialHashError,
    CredentialHasher,
};
use crate::domain::{
    Account, AccountId, AccountPublicView, AccountRequest, CredentialHash, Error,
    RegistrationValidationError,
};

/// Client-facing message for a username collision.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "The username already exists";

/// Registration service implementing the driving port.
#[derive(Clone)]
pub struct AccountRegistrationService<R, H> {
    accounts: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountRegistrationService<R, H> {
    /// Create a new service over the given repository and hasher.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

impl<R, H> AccountRegistrationService<R, H>
where
    R: AccountRepository,
    H: CredentialHasher + 'static,
{
    fn map_validation_error(error: RegistrationValidationError) -> Error {
        debug!(field = %error.field(), reason = error.code(), "registration rejected");
        Error::validation_failed(error.to_string()).with_details(json!({
            "field": error.field().as_str(),
            "code": error.code(),
        }))
    }

    fn map_persistence_error(error: AccountPersistenceError) -> Error {
        match error {
            AccountPersistenceError::DuplicateUsername { username } => {
                debug!(%username, "registration rejected: username taken");
                Error::conflict(DUPLICATE_USERNAME_MESSAGE).with_details(json!({
                    "field": "username",
                    "code": "duplicate_username",
                }))
            }
            AccountPersistenceError::Connection { message } => {
                error!(%message, "account repository unavailable");
                Error::service_unavailable("account storage is temporarily unavailable")
            }
            AccountPersistenceError::Query { message } => {
                error!(%message, "account repository query failed");
                Error::internal(format!("account repository error: {message}"))
            }
        }
    }

    fn map_hash_error(error: CredentialHashError) -> Error {
        error!(error = %error, "credential derivation failed");
        Error::internal(format!("credential derivation failed: {error}"))
    }

    /// Derive the credential on a blocking thread so the runtime's workers
    /// stay free during the deliberately slow hash.
    async fn derive_credential(&self, password: Zeroizing<String>) -> Result<CredentialHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        task::spawn_blocking(move || hasher.derive(password.as_str()))
            .await
            .map_err(|err| {
                error!(error = %err, "credential derivation task failed");
                Error::internal(format!("credential derivation task failed: {err}"))
            })?
            .map_err(Self::map_hash_error)
    }
}

#[async_trait]
impl<R, H> AccountRegistration for AccountRegistrationService<R, H>
where
    R: AccountRepository,
    H: CredentialHasher + 'static,
{
    async fn register(&self, request: AccountRequest) -> Result<AccountPublicView, Error> {
        let validated = request.validate().map_err(Self::map_validation_error)?;
        let (username, password, full_name) = validated.into_parts();

        let password_hash = self.derive_credential(password).await?;
        let account = Account::new(AccountId::random(), username, full_name, password_hash);

        let stored = self
            .accounts
            .insert_unique(&account)
            .await
            .map_err(Self::map_persistence_error)?;

        info!(account_id = %stored.id(), "account registered");
        Ok(stored.public_view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAccountRepository, MockCredentialHasher};
    use crate::domain::{ErrorCode, RawField};
    use rstest::{fixture, rstest};

    const STORED_HASH: &str = "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g";

    fn make_service(
        repo: MockAccountRepository,
        hasher: MockCredentialHasher,
    ) -> AccountRegistrationService<MockAccountRepository, MockCredentialHasher> {
        AccountRegistrationService::new(Arc::new(repo), Arc::new(hasher))
    }

    fn deriving_hasher() -> MockCredentialHasher {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_derive()
            .times(1)
            .returning(|_| Ok(CredentialHash::from_encoded(STORED_HASH).expect("fixture hash")));
        hasher
    }

    #[fixture]
    fn request() -> AccountRequest {
        AccountRequest {
            username: RawField::text("bobuser"),
            password: RawField::text("baseball"),
            full_name: RawField::text(" Whitespace Wallace "),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_normalised_account(request: AccountRequest) {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_derive()
            .withf(|plaintext| plaintext == "baseball")
            .times(1)
            .returning(|_| Ok(CredentialHash::from_encoded(STORED_HASH).expect("fixture hash")));

        let mut repo = MockAccountRepository::new();
        repo.expect_insert_unique()
            .withf(|account| {
                account.username().as_str() == "bobuser"
                    && account.full_name().as_str() == "Whitespace Wallace"
                    && account.password_hash().as_str() == STORED_HASH
            })
            .times(1)
            .returning(|account| Ok(account.clone()));

        let service = make_service(repo, hasher);
        let view = service.register(request).await.expect("registration succeeds");

        assert_eq!(view.username, "bobuser");
        assert_eq!(view.full_name, "Whitespace Wallace");
        assert!(!view.id.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn validation_failure_skips_hashing_and_storage(request: AccountRequest) {
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_derive().times(0);
        let mut repo = MockAccountRepository::new();
        repo.expect_insert_unique().times(0);

        let service = make_service(repo, hasher);
        let request = AccountRequest {
            password: RawField::text("short"),
            ..request
        };
        let error = service.register(request).await.expect_err("validation fails");

        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        assert_eq!(error.message(), "Must be at least 8 characters long");
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "password", "code": "too_short" }))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_maps_to_conflict(request: AccountRequest) {
        let mut repo = MockAccountRepository::new();
        repo.expect_insert_unique()
            .times(1)
            .returning(|_| Err(AccountPersistenceError::duplicate_username("bobuser")));

        let service = make_service(repo, deriving_hasher());
        let error = service.register(request).await.expect_err("conflict");

        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), DUPLICATE_USERNAME_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failure_maps_to_service_unavailable(request: AccountRequest) {
        let mut repo = MockAccountRepository::new();
        repo.expect_insert_unique()
            .times(1)
            .returning(|_| Err(AccountPersistenceError::connection("10.0.0.5:5432 refused")));

        let service = make_service(repo, deriving_hasher());
        let error = service.register(request).await.expect_err("unavailable");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(!error.message().contains("10.0.0.5"));
    }

    #[rstest]
    #[tokio::test]
    async fn query_failure_maps_to_internal(request: AccountRequest) {
        let mut repo = MockAccountRepository::new();
        repo.expect_insert_unique()
            .times(1)
            .returning(|_| Err(AccountPersistenceError::query("syntax error")));

        let service = make_service(repo, deriving_hasher());
        let error = service.register(request).await.expect_err("internal");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn hash_failure_maps_to_internal_without_storing(request: AccountRequest) {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_derive()
            .times(1)
            .returning(|_| Err(CredentialHashError::derivation("bad params")));
        let mut repo = MockAccountRepository::new();
        repo.expect_insert_unique().times(0);

        let service = make_service(repo, hasher);
        let error = service.register(request).await.expect_err("internal");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
