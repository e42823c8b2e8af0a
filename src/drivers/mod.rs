//! Driver Layer
//!
//! Pluggable strategies for issuing and verifying a second factor.
//! Drivers are looked up by a stable string key, and a driver whose
//! backing capability is missing never makes it into the registry -
//! capability checks happen at registration time, not per call.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::repository::SettingStore;
use crate::domain::value_object::verification_code::VerificationCode;
use crate::error::{TwofaError, TwofaResult};

pub mod email;
#[cfg(feature = "totp")]
pub mod totp;

pub use email::EmailDriver;
#[cfg(feature = "totp")]
pub use totp::{TotpDriver, TotpProvisioning};

/// Stable driver identifier
///
/// The string form is what lands in the `twofaDriver` setting and in
/// the comma-joined `enabledDrivers` module configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// One-time code delivered by email
    Email,
    /// Time-based one-time password (authenticator app)
    Totp,
}

impl DriverKind {
    /// Stable string key for storage and configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            DriverKind::Email => "email",
            DriverKind::Totp => "totp",
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverKind {
    type Err = TwofaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(DriverKind::Email),
            "totp" => Ok(DriverKind::Totp),
            other => Err(TwofaError::UnknownDriver(other.to_string())),
        }
    }
}

/// Outcome of a successful `Driver::send`
#[derive(Debug, Clone)]
pub enum Issued {
    /// A code was generated and delivered; the engine hashes and stores it
    Code(VerificationCode),
    /// The driver is ready to verify without a delivered code (TOTP);
    /// only the presence of the pending marker matters
    Ready,
}

/// Driver contract
///
/// `send` issues (or confirms readiness to verify) a second factor for
/// the given user; `check_code` verifies a submitted code. Both get the
/// settings store threaded in explicitly - drivers keep their secrets
/// under driver-specific setting names.
pub trait Driver: Send + Sync {
    /// Stable identifier
    fn kind(&self) -> DriverKind;

    /// Human-readable driver name
    fn name(&self) -> &str;

    /// Short user-facing description
    fn info(&self) -> &str;

    /// Whether the backing capability is available
    fn is_installed(&self) -> bool;

    /// Issue a verification code, or confirm readiness to verify
    fn send(&self, user: &User, store: &dyn SettingStore) -> TwofaResult<Issued>;

    /// Verify a submitted code
    fn check_code(&self, user: &User, store: &dyn SettingStore, code: &str) -> TwofaResult<bool>;
}

/// Registry of available drivers
///
/// Replaces dynamic class-name instantiation with an explicit map from
/// `DriverKind` to a shared driver instance.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: Vec<Arc<dyn Driver>>,
}

impl DriverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver, refusing drivers whose capability is missing
    ///
    /// Returns whether the driver was accepted. Registering the same
    /// kind twice replaces the earlier instance.
    pub fn register(&mut self, driver: Arc<dyn Driver>) -> bool {
        if !driver.is_installed() {
            tracing::warn!(
                driver = %driver.kind(),
                "Driver backing capability is missing, not registering"
            );
            return false;
        }

        self.drivers.retain(|d| d.kind() != driver.kind());
        self.drivers.push(driver);
        true
    }

    /// Look up a driver by kind
    pub fn get(&self, kind: DriverKind) -> Option<Arc<dyn Driver>> {
        self.drivers.iter().find(|d| d.kind() == kind).cloned()
    }

    /// Check whether a driver of this kind is registered
    pub fn contains(&self, kind: DriverKind) -> bool {
        self.drivers.iter().any(|d| d.kind() == kind)
    }

    /// Kinds of all registered drivers, in registration order
    pub fn kinds(&self) -> Vec<DriverKind> {
        self.drivers.iter().map(|d| d.kind()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubDriver {
        kind: DriverKind,
        installed: bool,
    }

    impl Driver for StubDriver {
        fn kind(&self) -> DriverKind {
            self.kind
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn info(&self) -> &str {
            "stub driver"
        }

        fn is_installed(&self) -> bool {
            self.installed
        }

        fn send(&self, _user: &User, _store: &dyn SettingStore) -> TwofaResult<Issued> {
            Ok(Issued::Ready)
        }

        fn check_code(
            &self,
            _user: &User,
            _store: &dyn SettingStore,
            _code: &str,
        ) -> TwofaResult<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_driver_kind_string_roundtrip() {
        assert_eq!("email".parse::<DriverKind>().unwrap(), DriverKind::Email);
        assert_eq!("totp".parse::<DriverKind>().unwrap(), DriverKind::Totp);
        assert_eq!(DriverKind::Email.as_str(), "email");
        assert!("sms".parse::<DriverKind>().is_err());
    }

    #[test]
    fn test_registry_accepts_installed_driver() {
        let mut registry = DriverRegistry::new();
        assert!(registry.register(Arc::new(StubDriver {
            kind: DriverKind::Email,
            installed: true,
        })));
        assert!(registry.contains(DriverKind::Email));
        assert_eq!(registry.kinds(), vec![DriverKind::Email]);
    }

    #[test]
    fn test_registry_refuses_uninstalled_driver() {
        let mut registry = DriverRegistry::new();
        assert!(!registry.register(Arc::new(StubDriver {
            kind: DriverKind::Totp,
            installed: false,
        })));
        assert!(!registry.contains(DriverKind::Totp));
        assert!(registry.get(DriverKind::Totp).is_none());
    }
}
