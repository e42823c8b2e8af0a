//! Infrastructure Layer
//!
//! In-memory collaborator implementations. Hosts plug in their own
//! `SettingStore` / `GroupDirectory` / `Mailer` backed by whatever
//! they persist settings in.

pub mod memory;

pub use memory::{MemoryGroupDirectory, MemorySettingStore};
