//! Collaborator Traits
//!
//! Interfaces to the host platform: the per-user settings store, the
//! group directory and the outbound mailer. The host injects concrete
//! implementations; `infra::memory` provides in-memory ones for tests
//! and embedding.

use crate::domain::value_object::{group_id::GroupId, user_id::UserId};
use crate::error::TwofaResult;

/// Setting name for the per-user driver selection
pub const DRIVER_SETTING: &str = "twofaDriver";
/// Setting name for the hashed pending verification code
pub const CODE_SETTING: &str = "twofaCode";

/// Per-user persistent key/value settings store
///
/// Read-after-write consistency for a single user's keys within one
/// request is assumed; concurrent requests for the same user are not
/// coordinated by this module.
pub trait SettingStore: Send + Sync {
    /// Get a setting value, `None` if unset
    fn get(&self, user_id: &UserId, name: &str) -> TwofaResult<Option<String>>;

    /// Set a setting value
    fn set(&self, user_id: &UserId, name: &str, value: &str) -> TwofaResult<()>;

    /// Delete a setting; deleting an absent setting is not an error
    fn delete(&self, user_id: &UserId, name: &str) -> TwofaResult<()>;
}

/// Host group directory
///
/// Backs the default enforcement rule: when no enforced groups are
/// configured, every administrative group is enforced.
pub trait GroupDirectory: Send + Sync {
    /// Ids of all administrative groups
    fn admin_group_ids(&self) -> TwofaResult<Vec<GroupId>>;
}

/// Composed verification mail, ready for the host mailer
#[derive(Debug, Clone)]
pub struct VerificationMail {
    /// Recipient address
    pub to: String,
    /// Mail subject
    pub subject: String,
    /// The one-time code to embed in the mail body/template
    pub code: String,
    /// Language tag the host should render the mail in
    pub language: String,
}

/// Outbound mailer
///
/// Transport and template rendering belong to the host; dispatch is a
/// blocking call and is not retried on failure.
pub trait Mailer: Send + Sync {
    /// Dispatch a verification mail
    fn send(&self, mail: &VerificationMail) -> TwofaResult<()>;
}
