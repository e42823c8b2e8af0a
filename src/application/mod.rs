//! Application Layer
//!
//! Configuration, enforcement policy, and the verification engine.

pub mod config;
pub mod enforcement;
pub mod engine;

// Re-exports
pub use config::{EnforcedGroups, TwofaConfig};
pub use enforcement::EnforcementPolicy;
pub use engine::VerificationEngine;
