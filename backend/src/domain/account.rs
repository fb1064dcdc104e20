//! Account data model.
//!
//! An [`Account`] is only ever created by a successful registration. Its
//! credential hash never leaves the domain: the public projection is
//! [`AccountPublicView`], which carries the identifier, username, and full
//! name only.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the account newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyUsername,
    UsernameSurroundingWhitespace,
    EmptyCredentialHash,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameSurroundingWhitespace => {
                write!(f, "username must not start or end with whitespace")
            }
            Self::EmptyCredentialHash => write!(f, "credential hash must not be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Whitespace stripped from client-supplied text: Unicode `White_Space`
/// plus the byte order mark U+FEFF.
pub(crate) fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// `value` without leading or trailing [`is_padding`] characters.
pub(crate) fn trim_padding(value: &str) -> &str {
    value.trim_matches(is_padding)
}

/// Stable account identifier, generated once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random [`AccountId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique login name.
///
/// ## Invariants
/// - non-empty
/// - no leading or trailing whitespace
///
/// # Examples
/// ```
/// use backend::domain::Username;
///
/// assert!(Username::new("ada").is_ok());
/// assert!(Username::new(" ada").is_err());
/// assert!(Username::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, AccountValidationError> {
        let username = username.into();
        if trim_padding(&username) != username {
            return Err(AccountValidationError::UsernameSurroundingWhitespace);
        }
        if username.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Display name attached to an account. Always trimmed; may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FullName(String);

impl FullName {
    /// Build a full name, trimming surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::FullName;
    ///
    /// assert_eq!(FullName::new(" Whitespace Wallace ").as_str(), "Whitespace Wallace");
    /// ```
    pub fn new(full_name: impl AsRef<str>) -> Self {
        Self(trim_padding(full_name.as_ref()).to_owned())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

/// One-way derived credential in PHC string form.
///
/// Not `Serialize` or `Display`; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap an encoded hash produced by a credential hasher or read from
    /// storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Result<Self, AccountValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(AccountValidationError::EmptyCredentialHash);
        }
        Ok(Self(encoded))
    }

    /// Encoded hash, for persistence and verification only.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}

/// Persisted account.
///
/// ## Invariants
/// - `username` is unique across all accounts (enforced by the repository).
/// - `full_name` carries no surrounding whitespace.
/// - `password_hash` is never exposed through [`AccountPublicView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    username: Username,
    full_name: FullName,
    password_hash: CredentialHash,
}

impl Account {
    pub fn new(
        id: AccountId,
        username: Username,
        full_name: FullName,
        password_hash: CredentialHash,
    ) -> Self {
        Self {
            id,
            username,
            full_name,
            password_hash,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn password_hash(&self) -> &CredentialHash {
        &self.password_hash
    }

    /// Project the account into the client-safe view.
    pub fn public_view(&self) -> AccountPublicView {
        AccountPublicView {
            id: self.id.to_string(),
            username: self.username.to_string(),
            full_name: self.full_name.to_string(),
        }
    }
}

/// Account fields safe to return to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountPublicView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "bobuser")]
    pub username: String,
    #[schema(example = "Bob User")]
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample_account() -> Account {
        Account::new(
            AccountId::random(),
            Username::new("bobuser").expect("valid username"),
            FullName::new("Bob User"),
            CredentialHash::from_encoded("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA")
                .expect("non-empty hash"),
        )
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyUsername)]
    #[case(" bob", AccountValidationError::UsernameSurroundingWhitespace)]
    #[case("bob\t", AccountValidationError::UsernameSurroundingWhitespace)]
    #[case("   ", AccountValidationError::UsernameSurroundingWhitespace)]
    #[case("\u{FEFF}bob", AccountValidationError::UsernameSurroundingWhitespace)]
    fn username_rejects_invalid_input(
        #[case] input: &str,
        #[case] expected: AccountValidationError,
    ) {
        assert_eq!(Username::new(input), Err(expected));
    }

    #[rstest]
    #[case(" Whitespace Wallace ", "Whitespace Wallace")]
    #[case("", "")]
    #[case("   ", "")]
    #[case("\u{FEFF}Bob User\u{FEFF}", "Bob User")]
    fn full_name_is_trimmed(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(FullName::new(input).as_str(), expected);
    }

    #[rstest]
    fn credential_hash_debug_is_redacted() {
        let hash = CredentialHash::from_encoded("secret-hash").expect("non-empty hash");
        assert!(!format!("{hash:?}").contains("secret-hash"));
    }

    #[rstest]
    fn public_view_has_exactly_three_keys() {
        let account = sample_account();
        let value = serde_json::to_value(account.public_view()).expect("serialise view");
        let object = value.as_object().expect("view is an object");

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["fullName", "id", "username"]);
        assert_eq!(value["id"], json!(account.id().to_string()));
        assert_eq!(value["username"], json!("bobuser"));
        assert_eq!(value["fullName"], json!("Bob User"));
    }
}
