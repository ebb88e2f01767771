//! Password credential value object and the hashers that derive it.
//!
//! The store never sees a plaintext secret after creation: it keeps the
//! `Password` produced by a `CredentialHasher`, an Argon2 PHC string by
//! default.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::HashingConfig;
use crate::errors::{AppError, AppResult};

/// Derived, non-reversible credential.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Never print the hash
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap an existing hash.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a plain text secret against this hash.
    ///
    /// The PHC string carries its own parameters, so any Argon2 work factor
    /// verifies with a default instance.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// One-way derivation of a stored credential from a submitted secret.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plain_text: &str) -> AppResult<Password>;
}

/// Argon2id hasher with a configurable work factor.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Build a hasher with explicit Argon2 parameters.
    ///
    /// # Errors
    /// Returns an internal error if the parameters are out of range.
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> AppResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::internal(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn from_config(config: &HashingConfig) -> AppResult<Self> {
        Self::with_params(config.memory_kib, config.iterations, config.parallelism)
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }
}
