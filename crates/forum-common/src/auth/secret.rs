//! Shared secrets loaded from configuration
//!
//! Wraps a secret string so it never shows up in `Debug` output and can only
//! be compared against user input in constant time.

use sha2::{Digest, Sha512};
use std::fmt;

/// A configured secret value (session signing secret, upgrade passcode)
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(String);

impl SharedSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Check a candidate against the secret without short-circuiting
    ///
    /// Both sides are hashed to fixed-length digests first, so neither the
    /// position of the first differing byte nor the candidate's length leaks
    /// through timing.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = Sha512::digest(self.0.as_bytes());
        let actual = Sha512::digest(candidate.as_bytes());

        expected
            .iter()
            .zip(actual.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Stretch the secret into a 64-byte key
    #[must_use]
    pub fn derive_key(&self) -> [u8; 64] {
        let digest = Sha512::digest(self.0.as_bytes());
        let mut key = [0u8; 64];
        key.copy_from_slice(&digest);
        key
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(***)")
    }
}
