//! In-Memory Collaborators
//!
//! `SettingStore` and `GroupDirectory` implementations backed by plain
//! collections. Used by the test suite, and usable by hosts that keep
//! user settings in memory (or want a fixture for their own tests).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entity::group::Group;
use crate::domain::repository::{GroupDirectory, SettingStore};
use crate::domain::value_object::{group_id::GroupId, user_id::UserId};
use crate::error::{TwofaError, TwofaResult};

/// In-memory per-user settings store
#[derive(Default)]
pub struct MemorySettingStore {
    entries: Mutex<HashMap<(UserId, String), String>>,
}

impl MemorySettingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingStore for MemorySettingStore {
    fn get(&self, user_id: &UserId, name: &str) -> TwofaResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| TwofaError::StoreUnavailable("poisoned lock".into()))?;
        Ok(entries.get(&(user_id.clone(), name.to_string())).cloned())
    }

    fn set(&self, user_id: &UserId, name: &str, value: &str) -> TwofaResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TwofaError::StoreUnavailable("poisoned lock".into()))?;
        entries.insert((user_id.clone(), name.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, user_id: &UserId, name: &str) -> TwofaResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TwofaError::StoreUnavailable("poisoned lock".into()))?;
        entries.remove(&(user_id.clone(), name.to_string()));
        Ok(())
    }
}

/// In-memory group directory
pub struct MemoryGroupDirectory {
    groups: Vec<Group>,
}

impl MemoryGroupDirectory {
    /// Create a directory over a fixed group list
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }
}

impl GroupDirectory for MemoryGroupDirectory {
    fn admin_group_ids(&self) -> TwofaResult<Vec<GroupId>> {
        Ok(self
            .groups
            .iter()
            .filter(|g| g.is_admin_group)
            .map(|g| g.group_id.clone())
            .collect())
    }
}
