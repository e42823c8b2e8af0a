//! Value Object Module

pub mod group_id;
#[cfg(feature = "totp")]
pub mod totp_secret;
pub mod user_id;
pub mod verification_code;
