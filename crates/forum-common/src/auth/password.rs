//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::OnceLock;

use crate::error::AppError;

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    dummy_hash: OnceLock<Option<String>>,
}

impl PasswordService {
    /// Create a password service with the default Argon2id parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a password service with explicit cost parameters
    ///
    /// Tests use this to keep hashing fast.
    ///
    /// # Errors
    /// Returns an error if the parameters are out of range
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::Config(format!("invalid argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_hash: OnceLock::new(),
        })
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if the stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

        // Parameters embedded in the PHC string win over the hasher's own.
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Verify a password and return an error if invalid
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    /// Burn the same work as a real verification for a user that doesn't exist
    ///
    /// Keeps "unknown user" and "wrong password" indistinguishable by timing.
    /// Always returns `InvalidCredentials`.
    pub fn verify_absent(&self, password: &str) -> AppError {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.hash("not-a-real-password").ok());

        if let Some(hash) = dummy {
            let _ = self.verify(password, hash);
        }

        AppError::InvalidCredentials
    }
}
