//! Registration request validation.
//!
//! Inbound adapters hand the domain an [`AccountRequest`] built from untrusted
//! input. [`AccountRequest::validate`] applies the checks in a fixed order so
//! the reported failure is deterministic:
//!
//! 1. presence of `username` then `password`;
//! 2. string type of `username`, `password`, then `fullName` (when supplied);
//! 3. no surrounding whitespace on `username` then `password`;
//! 4. minimum `username` length;
//! 5. `password` length bounds.
//!
//! The first failing check wins. Lengths are measured in UTF-16 code units,
//! so a character outside the Basic Multilingual Plane counts twice, and
//! surrounding whitespace includes the byte order mark U+FEFF.

use std::fmt;

use zeroize::Zeroizing;

use super::account::{FullName, Username, trim_padding};

/// Minimum username length, in UTF-16 code units.
pub const USERNAME_MIN: usize = 1;
/// Minimum password length, in UTF-16 code units.
pub const PASSWORD_MIN: usize = 8;
/// Maximum password length, in UTF-16 code units. Longer inputs would be
/// truncated or rejected by common password hashing schemes.
pub const PASSWORD_MAX: usize = 72;

/// A single untrusted request field.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum RawField {
    /// The key was not present.
    #[default]
    Absent,
    /// The key was present with a string value.
    Text(String),
    /// The key was present with any non-string value, `null` included.
    NotText,
}

impl RawField {
    /// Convenience constructor for string values.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Debug for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Text(value) => write!(f, "Text({} chars)", value.chars().count()),
            Self::NotText => f.write_str("NotText"),
        }
    }
}

/// Raw, unvalidated registration input.
///
/// # Examples
/// ```
/// use backend::domain::{AccountRequest, RawField};
///
/// let request = AccountRequest {
///     username: RawField::text("bobuser"),
///     password: RawField::text("baseball"),
///     full_name: RawField::Absent,
/// };
/// let validated = request.validate().expect("valid request");
/// assert_eq!(validated.username().as_str(), "bobuser");
/// assert_eq!(validated.full_name().as_str(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountRequest {
    pub username: RawField,
    pub password: RawField,
    pub full_name: RawField,
}

/// Request fields named in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    Username,
    Password,
    FullName,
}

impl RegistrationField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::FullName => "fullName",
        }
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First validation failure found in an [`AccountRequest`].
///
/// The `Display` output is the exact message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    Missing(RegistrationField),
    NotAString(RegistrationField),
    SurroundingWhitespace(RegistrationField),
    TooShort { field: RegistrationField, min: usize },
    TooLong { field: RegistrationField, max: usize },
}

impl RegistrationValidationError {
    /// Field that failed validation.
    pub fn field(&self) -> RegistrationField {
        match *self {
            Self::Missing(field)
            | Self::NotAString(field)
            | Self::SurroundingWhitespace(field)
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. } => field,
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing(_) => "missing_field",
            Self::NotAString(_) => "not_a_string",
            Self::SurroundingWhitespace(_) => "surrounding_whitespace",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "Missing '{field}' in request body"),
            Self::NotAString(_) => write!(f, "Field is not a string"),
            Self::SurroundingWhitespace(_) => write!(f, "Cannot start or end with whitespace"),
            Self::TooShort { min, .. } => write!(f, "Must be at least {min} characters long"),
            Self::TooLong { max, .. } => write!(f, "Must be at most {max} characters long"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Registration input that passed every check.
///
/// ## Invariants
/// - `username` has no surrounding whitespace and is non-empty.
/// - `password` is between [`PASSWORD_MIN`] and [`PASSWORD_MAX`] characters
///   and is zeroed on drop.
/// - `full_name` is trimmed.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    username: Username,
    password: Zeroizing<String>,
    full_name: FullName,
}

impl ValidatedRegistration {
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password, for credential derivation only.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Split into parts, handing ownership of the password to the caller.
    pub fn into_parts(self) -> (Username, Zeroizing<String>, FullName) {
        (self.username, self.password, self.full_name)
    }
}

impl fmt::Debug for ValidatedRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedRegistration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}

type Check = Result<(), RegistrationValidationError>;

impl AccountRequest {
    /// Validate and normalise the request.
    pub fn validate(self) -> Result<ValidatedRegistration, RegistrationValidationError> {
        use RegistrationField::{FullName as FullNameField, Password, Username as UsernameField};

        require_present(UsernameField, &self.username)?;
        require_present(Password, &self.password)?;

        let username = require_text(UsernameField, self.username)?;
        let password = Zeroizing::new(require_text(Password, self.password)?);
        let full_name = match self.full_name {
            RawField::Absent => String::new(),
            other => require_text(FullNameField, other)?,
        };

        reject_surrounding_whitespace(UsernameField, &username)?;
        reject_surrounding_whitespace(Password, &password)?;

        check_min_length(UsernameField, trim_padding(&username), USERNAME_MIN)?;
        check_min_length(Password, &password, PASSWORD_MIN)?;
        check_max_length(Password, &password, PASSWORD_MAX)?;

        // Earlier checks guarantee a non-empty, already-trimmed username.
        let username = Username::new(username)
            .map_err(|_| RegistrationValidationError::TooShort {
                field: UsernameField,
                min: USERNAME_MIN,
            })?;

        Ok(ValidatedRegistration {
            username,
            password,
            full_name: FullName::new(full_name),
        })
    }
}

fn require_present(field: RegistrationField, value: &RawField) -> Check {
    match value {
        RawField::Absent => Err(RegistrationValidationError::Missing(field)),
        RawField::Text(_) | RawField::NotText => Ok(()),
    }
}

fn require_text(
    field: RegistrationField,
    value: RawField,
) -> Result<String, RegistrationValidationError> {
    match value {
        RawField::Text(text) => Ok(text),
        RawField::Absent => Err(RegistrationValidationError::Missing(field)),
        RawField::NotText => Err(RegistrationValidationError::NotAString(field)),
    }
}

fn reject_surrounding_whitespace(field: RegistrationField, value: &str) -> Check {
    if trim_padding(value) != value {
        return Err(RegistrationValidationError::SurroundingWhitespace(field));
    }
    Ok(())
}

fn length(value: &str) -> usize {
    value.encode_utf16().count()
}

fn check_min_length(field: RegistrationField, value: &str, min: usize) -> Check {
    if length(value) < min {
        return Err(RegistrationValidationError::TooShort { field, min });
    }
    Ok(())
}

fn check_max_length(field: RegistrationField, value: &str, max: usize) -> Check {
    if length(value) > max {
        return Err(RegistrationValidationError::TooLong { field, max });
    }
    Ok(())
}
