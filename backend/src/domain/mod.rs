//! Domain primitives, validation, and the account registration use-case.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters, and keep the registration rules free of transport or storage
//! concerns.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Account / AccountPublicView: persisted entity and its client view.
//! - AccountRequest / ValidatedRegistration: raw and validated input.
//! - AccountRegistrationService: the create-account orchestration.

pub mod account;
pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, AccountPublicView, AccountValidationError, CredentialHash, FullName,
    Username,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::registration::{
    AccountRequest, PASSWORD_MAX, PASSWORD_MIN, RawField, RegistrationField,
    RegistrationValidationError, USERNAME_MIN, ValidatedRegistration,
};
pub use self::registration_service::{AccountRegistrationService, DUPLICATE_USERNAME_MESSAGE};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::conflict("The username already exists"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
