//! Two-Factor Authentication Module
//!
//! Optional 2fa for host-platform user accounts, invoked from the
//! host's authentication pipeline. Not a standalone service: the host
//! owns users, groups, settings persistence, mail transport, routing
//! and rendering, and injects them through the traits in `domain`.
//!
//! Structure:
//! - `domain/` - entities, value objects, collaborator traits
//! - `drivers/` - driver contract, email and TOTP drivers
//! - `application/` - configuration, enforcement policy, verification engine
//! - `infra/` - in-memory collaborator implementations
//!
//! ## Features
//! - Emailed one-time codes, hashed at rest, checked in constant time
//! - Authenticator-app TOTP (6 digits, 30 s step) with QR provisioning,
//!   behind the default-on `totp` cargo feature
//! - Group-based enforcement: admins (or configured groups) must use
//!   2fa even without a personal driver selection
//! - Boolean, fail-closed issuance / fail-open pass-through semantics
//!   at the engine boundary
//!
//! ## Request flow
//! On each authenticated request (outside the check page itself) the
//! host asks [`VerificationEngine::is_verifying_required`]; on login it
//! calls [`VerificationEngine::enable_verifying`] and later settles the
//! submitted code with [`VerificationEngine::consume_valid_code`].

pub mod application;
pub mod domain;
pub mod drivers;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{EnforcedGroups, EnforcementPolicy, TwofaConfig, VerificationEngine};
pub use domain::{Group, GroupDirectory, GroupId, Mailer, SettingStore, User, UserId, VerificationMail};
pub use drivers::{Driver, DriverKind, DriverRegistry, EmailDriver, Issued};
#[cfg(feature = "totp")]
pub use drivers::{TotpDriver, TotpProvisioning};
pub use error::{TwofaError, TwofaResult};
pub use infra::{MemoryGroupDirectory, MemorySettingStore};
