//! TOTP Secret Value Object
//!
//! Wraps a per-user TOTP shared secret.
//! Uses Google Authenticator compatible settings.

use serde::{Deserialize, Serialize};
use totp_rs::{Algorithm, Secret, TOTP};

use crate::error::{TwofaError, TwofaResult};

/// TOTP configuration constants.
///
/// The digit count is fixed: authenticator apps and the verification
/// algorithm both assume 6 digits, and the module-level `code_length`
/// setting must never be fed into it.
const TOTP_DIGITS: usize = 6;
const TOTP_STEP: u64 = 30;
const TOTP_SKEW: u8 = 1;

/// TOTP secret for two-factor authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotpSecret {
    /// Base32-encoded secret
    secret_base32: String,
}

impl TotpSecret {
    /// Generate a new random TOTP secret
    pub fn generate() -> Self {
        let secret = Secret::generate_secret();
        Self {
            secret_base32: secret.to_encoded().to_string(),
        }
    }

    /// Create from a base32-encoded string (from the settings store)
    pub fn from_base32(secret: impl Into<String>) -> TwofaResult<Self> {
        let secret_str = secret.into();
        // Validate by trying to decode
        Secret::Encoded(secret_str.clone())
            .to_bytes()
            .map_err(|e| TwofaError::InvalidSecret(format!("{:?}", e)))?;

        Ok(Self {
            secret_base32: secret_str,
        })
    }

    /// Get the base32-encoded secret for storage
    pub fn as_base32(&self) -> &str {
        &self.secret_base32
    }

    /// Create a TOTP instance for this secret
    fn to_totp(&self, account_name: &str, issuer: &str) -> TwofaResult<TOTP> {
        let secret = Secret::Encoded(self.secret_base32.clone());

        TOTP::new(
            Algorithm::SHA1,
            TOTP_DIGITS,
            TOTP_SKEW,
            TOTP_STEP,
            secret
                .to_bytes()
                .map_err(|e| TwofaError::InvalidSecret(format!("{:?}", e)))?,
            Some(issuer.to_string()),
            account_name.to_string(),
        )
        .map_err(|e| TwofaError::Internal(format!("Failed to create TOTP: {}", e)))
    }

    /// Verify a TOTP code against the current/adjacent time window
    pub fn verify(&self, code: &str, account_name: &str, issuer: &str) -> TwofaResult<bool> {
        let totp = self.to_totp(account_name, issuer)?;
        Ok(totp.check_current(code).unwrap_or(false))
    }

    /// Generate the current TOTP code (for testing)
    #[cfg(test)]
    pub fn generate_current(&self, account_name: &str, issuer: &str) -> TwofaResult<String> {
        let totp = self.to_totp(account_name, issuer)?;
        totp.generate_current()
            .map_err(|e| TwofaError::Internal(format!("Failed to generate TOTP: {}", e)))
    }

    /// Get the otpauth:// URL for manual authenticator entry
    pub fn otpauth_url(&self, account_name: &str, issuer: &str) -> TwofaResult<String> {
        let totp = self.to_totp(account_name, issuer)?;
        Ok(totp.get_url())
    }

    /// Generate a provisioning QR code as base64-encoded PNG
    pub fn qr_code_base64(&self, account_name: &str, issuer: &str) -> TwofaResult<String> {
        let totp = self.to_totp(account_name, issuer)?;
        totp.get_qr_base64()
            .map_err(|e| TwofaError::Internal(format!("Failed to generate QR code: {}", e)))
    }
}
