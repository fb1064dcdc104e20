//! Argon2id implementation of the [`CredentialHasher`] port.
//!
//! Hashes are stored in PHC string form, so each one records its own salt and
//! cost parameters. Verification therefore keeps working for hashes derived
//! under an older [`HashingCost`].

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::domain::CredentialHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Argon2 cost parameters.
///
/// The default targets roughly 100–300 ms per hash on commodity hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

impl HashingCost {
    /// The cheapest parameters Argon2 accepts.
    ///
    /// Hashes derived this way offer no brute-force resistance. Use it where
    /// hashing time matters more than secrecy, such as test suites that
    /// register many accounts.
    ///
    /// # Examples
    /// ```
    /// use backend::outbound::credentials::HashingCost;
    ///
    /// let cost = HashingCost::insecure_for_tests();
    /// assert!(cost.memory_kib < HashingCost::default().memory_kib);
    /// ```
    #[must_use]
    pub fn insecure_for_tests() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Argon2id credential hasher.
///
/// # Examples
/// ```
/// use backend::domain::ports::CredentialHasher;
/// use backend::outbound::credentials::{Argon2CredentialHasher, HashingCost};
///
/// let hasher = Argon2CredentialHasher::new(HashingCost::insecure_for_tests()).expect("valid cost");
/// let hash = hasher.derive("baseball").expect("derive");
/// assert!(hasher.verify("baseball", &hash));
/// assert!(!hasher.verify("softball", &hash));
/// ```
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    /// Build a hasher, rejecting cost parameters Argon2 cannot use.
    pub fn new(cost: HashingCost) -> Result<Self, CredentialHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|err| CredentialHashError::derivation(format!("invalid cost: {err}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl std::fmt::Debug for Argon2CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2CredentialHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn derive(&self, plaintext: &str) -> Result<CredentialHash, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| CredentialHashError::derivation(err.to_string()))?
            .to_string();
        CredentialHash::from_encoded(encoded)
            .map_err(|err| CredentialHashError::derivation(err.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &CredentialHash) -> bool {
        let Ok(parsed) = PasswordHash::new(hash.as_str()) else {
            return false;
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
