//! Verification Code Value Object
//!
//! Random numeric codes issued by the email driver, and the one-way
//! hash under which a pending code is persisted. The raw code is never
//! stored - only `CodeHash` reaches the settings store.

use base64::{Engine, engine::general_purpose};
use rand::Rng;
use sha2::{Digest, Sha256};

/// A freshly generated one-time verification code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a random numeric code of the given display length
    pub fn generate(length: usize) -> Self {
        let mut rng = rand::rng();
        let code = (0..length)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        Self(code)
    }

    /// Get the code digits
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One-way hash of a pending verification code
///
/// A fast, unsalted digest: the code is short-lived and single-use, so
/// password-grade hashing is intentionally not applied here. Anyone
/// changing this trade-off should also revisit the pending-code
/// lifecycle in the verification engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeHash(String);

impl CodeHash {
    /// Hash a code for storage
    pub fn of(code: &str) -> Self {
        let digest = Sha256::digest(code.as_bytes());
        Self(general_purpose::STANDARD.encode(digest))
    }

    /// Wrap a previously stored hash value
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the storable representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a submitted code against this hash in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), Self::of(submitted).0.as_bytes())
    }
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
