//! Group Entity
//!
//! Read-only view of a host-owned user group. Only the administrative
//! flag matters here: unset enforcement defaults to all admin groups.

use crate::domain::value_object::group_id::GroupId;

/// Host group as seen by the twofa module
#[derive(Debug, Clone)]
pub struct Group {
    /// Opaque host identifier
    pub group_id: GroupId,
    /// Whether this is an administrative group
    pub is_admin_group: bool,
}

impl Group {
    /// Create a group view
    pub fn new(group_id: impl Into<GroupId>, is_admin_group: bool) -> Self {
        Self {
            group_id: group_id.into(),
            is_admin_group,
        }
    }
}
