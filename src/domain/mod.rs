//! Domain Layer
//!
//! Contains entities, value objects, and collaborator traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{group::Group, user::User};
pub use repository::{GroupDirectory, Mailer, SettingStore, VerificationMail};
pub use value_object::{group_id::GroupId, user_id::UserId};
