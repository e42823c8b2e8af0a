//! Verification Engine
//!
//! The per-request 2fa decision core: resolves the active driver for a
//! user, issues pending verifications, and validates submitted codes.
//!
//! Boundary semantics are boolean throughout (see `error`): a guest or
//! a user without a resolvable driver passes through unchallenged, a
//! failed issue leaves no pending state behind, and an unreachable
//! settings store fails writes while reads degrade to "unset".

use std::sync::Arc;

use crate::application::config::TwofaConfig;
use crate::application::enforcement::EnforcementPolicy;
use crate::domain::entity::user::User;
use crate::domain::repository::{CODE_SETTING, DRIVER_SETTING, GroupDirectory, SettingStore};
use crate::domain::value_object::verification_code::CodeHash;
use crate::drivers::{Driver, DriverKind, DriverRegistry, Issued};

/// 2fa verification and enforcement decision engine
pub struct VerificationEngine<S, G>
where
    S: SettingStore,
    G: GroupDirectory,
{
    store: Arc<S>,
    registry: Arc<DriverRegistry>,
    policy: EnforcementPolicy<G>,
    config: Arc<TwofaConfig>,
}

impl<S, G> VerificationEngine<S, G>
where
    S: SettingStore,
    G: GroupDirectory,
{
    pub fn new(
        store: Arc<S>,
        registry: Arc<DriverRegistry>,
        policy: EnforcementPolicy<G>,
        config: Arc<TwofaConfig>,
    ) -> Self {
        Self {
            store,
            registry,
            policy,
            config,
        }
    }

    /// Drivers that are both administratively enabled and registered,
    /// in configured order
    pub fn enabled_drivers(&self) -> Vec<DriverKind> {
        self.config
            .enabled_drivers
            .iter()
            .copied()
            .filter(|kind| self.registry.contains(*kind))
            .collect()
    }

    /// Resolve the effective driver selection for a user
    ///
    /// Order matters: a valid personal choice always wins; a stale or
    /// disabled choice counts as none; enforcement only supplies the
    /// configured default when no valid choice exists.
    fn driver_setting(&self, user: &User) -> Option<DriverKind> {
        let stored = match self.store.get(&user.user_id, DRIVER_SETTING) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    error = %e,
                    "Failed to read driver selection, treating as unset"
                );
                None
            }
        };

        let enabled = self.enabled_drivers();
        let selection = stored
            .and_then(|raw| raw.parse::<DriverKind>().ok())
            .filter(|kind| enabled.contains(kind));

        if selection.is_none() && self.policy.is_enforced_user(Some(user)) {
            return Some(self.config.default_driver);
        }

        selection
    }

    /// Resolve the active driver instance for a user, if any
    pub fn resolve_driver(&self, user: Option<&User>) -> Option<Arc<dyn Driver>> {
        let kind = self.driver_setting(user?)?;
        self.registry.get(kind)
    }

    /// Store or clear the user's driver selection
    ///
    /// Clearing the selection disables 2fa for the user and also drops
    /// any pending verification.
    pub fn set_driver(&self, user: Option<&User>, kind: Option<DriverKind>) -> bool {
        let Some(user) = user else {
            return false;
        };

        let result = match kind {
            Some(kind) => self.store.set(&user.user_id, DRIVER_SETTING, kind.as_str()),
            None => self
                .store
                .delete(&user.user_id, DRIVER_SETTING)
                .and_then(|()| self.store.delete(&user.user_id, CODE_SETTING)),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    error = %e,
                    "Failed to update driver selection"
                );
                false
            }
        }
    }

    /// Issue a verification code and mark verification as pending
    ///
    /// Fails closed: if the driver cannot issue (mailer error, missing
    /// TOTP secret, guest) or the store rejects the write, no pending
    /// state is left behind and `false` is returned.
    pub fn enable_verifying(&self, user: Option<&User>) -> bool {
        let Some(user) = user else {
            tracing::debug!("enable_verifying called without an authenticated user");
            return false;
        };

        let Some(driver) = self.resolve_driver(Some(user)) else {
            return false;
        };

        let issued = match driver.send(user, self.store.as_ref()) {
            Ok(issued) => issued,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    driver = %driver.kind(),
                    error = %e,
                    "Verification code could not be issued"
                );
                return false;
            }
        };

        // Only the hash is persisted; its presence is what flags the
        // host to show the code-entry form. For presence-only drivers
        // the stored value is never compared against anything.
        let hash = match &issued {
            Issued::Code(code) => CodeHash::of(code.as_str()),
            Issued::Ready => CodeHash::of(""),
        };

        match self.store.set(&user.user_id, CODE_SETTING, hash.as_str()) {
            Ok(()) => {
                tracing::info!(
                    user_id = %user.user_id,
                    driver = %driver.kind(),
                    "Verification pending"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    error = %e,
                    "Failed to store pending verification"
                );
                false
            }
        }
    }

    /// Clear any pending verification; idempotent
    pub fn disable_verifying(&self, user: Option<&User>) -> bool {
        let Some(user) = user else {
            return false;
        };

        match self.store.delete(&user.user_id, CODE_SETTING) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    error = %e,
                    "Failed to clear pending verification"
                );
                false
            }
        }
    }

    /// The single predicate the host pipeline consults per request:
    /// true iff a driver resolves and a verification is pending
    pub fn is_verifying_required(&self, user: Option<&User>) -> bool {
        let Some(user) = user else {
            return false;
        };

        if self.resolve_driver(Some(user)).is_none() {
            return false;
        }

        matches!(self.store.get(&user.user_id, CODE_SETTING), Ok(Some(_)))
    }

    /// Validate a submitted code without touching pending state
    ///
    /// Fail-open when no driver resolves: a user without active 2fa is
    /// never blocked by a stray code check. Callers acting on a `true`
    /// result must clear the pending state (`disable_verifying`, or
    /// use `consume_valid_code`), or the code stays replayable.
    pub fn is_valid_code(&self, user: Option<&User>, code: &str) -> bool {
        let Some(user) = user else {
            return true;
        };

        let Some(driver) = self.resolve_driver(Some(user)) else {
            return true;
        };

        match driver.check_code(user, self.store.as_ref(), code) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.user_id,
                    driver = %driver.kind(),
                    error = %e,
                    "Code check failed"
                );
                false
            }
        }
    }

    /// Validate a submitted code and consume the pending verification
    ///
    /// The recommended login-flow entry point: a code that checks out
    /// is immediately one-time by construction.
    pub fn consume_valid_code(&self, user: Option<&User>, code: &str) -> bool {
        if !self.is_valid_code(user, code) {
            return false;
        }

        self.disable_verifying(user);
        true
    }
}
