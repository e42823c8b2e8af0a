//! Enforcement Policy
//!
//! Decides whether a user is mandated to use 2fa by group membership,
//! independent of any personal driver selection. Guests are never
//! enforced. A failing group directory degrades to "not enforced"
//! rather than blocking sign-in.

use std::sync::Arc;

use crate::application::config::{EnforcedGroups, TwofaConfig};
use crate::domain::entity::user::User;
use crate::domain::repository::GroupDirectory;
use crate::domain::value_object::group_id::GroupId;

/// Group-membership 2fa mandate
pub struct EnforcementPolicy<G>
where
    G: GroupDirectory,
{
    groups: Arc<G>,
    config: Arc<TwofaConfig>,
}

impl<G> EnforcementPolicy<G>
where
    G: GroupDirectory,
{
    pub fn new(groups: Arc<G>, config: Arc<TwofaConfig>) -> Self {
        Self { groups, config }
    }

    /// Resolve the enforced group set from configuration
    fn enforced_groups(&self) -> Vec<GroupId> {
        match &self.config.enforced_groups {
            EnforcedGroups::AdminGroups => match self.groups.admin_group_ids() {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Group directory unavailable, treating enforcement as disabled"
                    );
                    Vec::new()
                }
            },
            EnforcedGroups::Explicit(ids) => ids.clone(),
        }
    }

    /// Check if at least one of the user's groups is enforced
    pub fn is_enforced_user(&self, user: Option<&User>) -> bool {
        let Some(user) = user else {
            return false;
        };

        let enforced = self.enforced_groups();
        if enforced.is_empty() {
            return false;
        }

        user.groups.iter().any(|g| enforced.contains(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::group::Group;
    use crate::error::{TwofaError, TwofaResult};
    use crate::infra::memory::MemoryGroupDirectory;

    struct FailingDirectory;

    impl GroupDirectory for FailingDirectory {
        fn admin_group_ids(&self) -> TwofaResult<Vec<GroupId>> {
            Err(TwofaError::StoreUnavailable("connection refused".into()))
        }
    }

    fn policy_with(
        groups: Vec<Group>,
        enforced: EnforcedGroups,
    ) -> EnforcementPolicy<MemoryGroupDirectory> {
        let config = TwofaConfig {
            enforced_groups: enforced,
            ..TwofaConfig::default()
        };
        EnforcementPolicy::new(Arc::new(MemoryGroupDirectory::new(groups)), Arc::new(config))
    }

    fn admin_member() -> User {
        User::new("u1", "admin@example.test").with_groups(vec![GroupId::new("g1")])
    }

    #[test]
    fn test_admin_groups_enforced_by_default() {
        let policy = policy_with(vec![Group::new("g1", true)], EnforcedGroups::AdminGroups);

        assert!(policy.is_enforced_user(Some(&admin_member())));

        let loner = User::new("u2", "user@example.test");
        assert!(!policy.is_enforced_user(Some(&loner)));
    }

    #[test]
    fn test_explicit_empty_disables_enforcement() {
        let policy = policy_with(
            vec![Group::new("g1", true)],
            EnforcedGroups::from_setting(Some("")),
        );

        assert!(!policy.is_enforced_user(Some(&admin_member())));
    }

    #[test]
    fn test_explicit_list_enforces_named_groups() {
        let policy = policy_with(
            vec![Group::new("g1", true), Group::new("g2", false)],
            EnforcedGroups::from_setting(Some("g2")),
        );

        let member = User::new("u3", "user@example.test").with_groups(vec![GroupId::new("g2")]);
        assert!(policy.is_enforced_user(Some(&member)));
        assert!(!policy.is_enforced_user(Some(&admin_member())));
    }

    #[test]
    fn test_guest_never_enforced() {
        let policy = policy_with(vec![Group::new("g1", true)], EnforcedGroups::AdminGroups);
        assert!(!policy.is_enforced_user(None));
    }

    #[test]
    fn test_directory_failure_degrades_to_not_enforced() {
        let config = Arc::new(TwofaConfig::default());
        let policy = EnforcementPolicy::new(Arc::new(FailingDirectory), config);
        assert!(!policy.is_enforced_user(Some(&admin_member())));
    }
}
