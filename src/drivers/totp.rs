//! TOTP Driver
//!
//! Verifies time-based one-time passwords against a per-user shared
//! secret, compatible with standard authenticator apps. Unlike the
//! email driver nothing is delivered on `send`: the user must first
//! provision a secret (QR scan or manual entry) through `provision`,
//! and `send` only confirms that a secret exists.

use std::sync::Arc;

use crate::application::config::TwofaConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::SettingStore;
use crate::domain::value_object::totp_secret::TotpSecret;
use crate::drivers::{Driver, DriverKind, Issued};
use crate::error::{TwofaError, TwofaResult};

/// Setting name for the per-user shared secret
pub(crate) const SECRET_SETTING: &str = "twofaGoogleAuthSecret";

/// Everything the host UI needs to show after provisioning
#[derive(Debug, Clone)]
pub struct TotpProvisioning {
    /// Base32 secret for manual authenticator entry
    pub secret: String,
    /// otpauth:// URL
    pub otpauth_url: String,
    /// QR code as base64-encoded PNG
    pub qr_code_base64: String,
}

/// Authenticator-app TOTP driver
pub struct TotpDriver {
    config: Arc<TwofaConfig>,
}

impl TotpDriver {
    /// Create the driver
    pub fn new(config: Arc<TwofaConfig>) -> Self {
        Self { config }
    }

    /// Generate and store a fresh secret for this user
    ///
    /// Replaces any earlier secret: codes from a previously scanned QR
    /// stop verifying the moment this returns.
    pub fn provision(
        &self,
        user: &User,
        store: &dyn SettingStore,
    ) -> TwofaResult<TotpProvisioning> {
        let secret = TotpSecret::generate();
        store.set(&user.user_id, SECRET_SETTING, secret.as_base32())?;

        tracing::info!(user_id = %user.user_id, "TOTP secret provisioned");

        Ok(TotpProvisioning {
            secret: secret.as_base32().to_string(),
            otpauth_url: secret.otpauth_url(&user.email, &self.config.issuer)?,
            qr_code_base64: secret.qr_code_base64(&user.email, &self.config.issuer)?,
        })
    }

    fn stored_secret(&self, user: &User, store: &dyn SettingStore) -> TwofaResult<Option<TotpSecret>> {
        match store.get(&user.user_id, SECRET_SETTING)? {
            Some(raw) if !raw.is_empty() => Ok(Some(TotpSecret::from_base32(raw)?)),
            _ => Ok(None),
        }
    }
}

impl Driver for TotpDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Totp
    }

    fn name(&self) -> &str {
        "Authenticator App"
    }

    fn info(&self) -> &str {
        "Open the two-factor authentication app on your device to view your \
         authentication code and verify your identity."
    }

    fn is_installed(&self) -> bool {
        // The TOTP library is compiled in with the `totp` feature
        true
    }

    fn send(&self, user: &User, store: &dyn SettingStore) -> TwofaResult<Issued> {
        // Readiness check only: without a provisioned secret this user
        // cannot verify, so issuing must fail
        if self.stored_secret(user, store)?.is_none() {
            return Err(TwofaError::NotProvisioned(DriverKind::Totp));
        }

        Ok(Issued::Ready)
    }

    fn check_code(&self, user: &User, store: &dyn SettingStore, code: &str) -> TwofaResult<bool> {
        let Some(secret) = self.stored_secret(user, store)? else {
            return Ok(false);
        };

        secret.verify(code, &user.email, &self.config.issuer)
    }
}
