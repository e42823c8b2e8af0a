//! User Entity
//!
//! Read-only view of a host-owned user account. The host hands this in
//! with every engine call; the module never mutates or persists it.

use crate::domain::value_object::{group_id::GroupId, user_id::UserId};

/// Host user as seen by the twofa module
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque host identifier
    pub user_id: UserId,
    /// Email address for the email driver
    pub email: String,
    /// Preferred language tag, if the user set one
    pub language: Option<String>,
    /// Group memberships, for enforcement evaluation
    pub groups: Vec<GroupId>,
}

impl User {
    /// Create a user view with no language preference and no groups
    pub fn new(user_id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            language: None,
            groups: Vec::new(),
        }
    }

    /// Set the preferred language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set group memberships
    pub fn with_groups(mut self, groups: Vec<GroupId>) -> Self {
        self.groups = groups;
        self
    }

    /// Check membership in a group
    pub fn in_group(&self, group_id: &GroupId) -> bool {
        self.groups.contains(group_id)
    }
}
