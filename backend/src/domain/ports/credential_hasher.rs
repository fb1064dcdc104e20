//! Driven port for one-way credential derivation.
//!
//! Implementations are CPU bound and synchronous; callers on an async runtime
//! run them on a blocking thread.

use crate::domain::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while deriving a credential hash.
    pub enum CredentialHashError {
        /// The hashing primitive rejected its input or parameters.
        Derivation { message: String } => "credential derivation failed: {message}",
    }
}

/// Derive and verify salted, deliberately slow password hashes.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Derive a fresh salted hash for `plaintext`.
    fn derive(&self, plaintext: &str) -> Result<CredentialHash, CredentialHashError>;

    /// Check `plaintext` against a stored hash. Mismatches and unreadable
    /// hashes both yield `false`.
    fn verify(&self, plaintext: &str, hash: &CredentialHash) -> bool;
}
