//! Twofa Error Types
//!
//! Internal error variants for driver and collaborator seams. At the
//! `VerificationEngine` boundary every failure is reduced to a boolean
//! outcome (with a tracing event); these variants only travel between
//! the engine, the drivers and the injected collaborators.

use thiserror::Error;

use crate::drivers::DriverKind;

/// Twofa-specific result type alias
pub type TwofaResult<T> = Result<T, TwofaError>;

/// Twofa-specific error variants
#[derive(Debug, Error)]
pub enum TwofaError {
    /// Operation attempted without an authenticated user
    #[error("No authenticated user")]
    NoIdentity,

    /// Driver selected but not yet provisioned for this user
    #[error("Driver `{0}` is not provisioned for this user")]
    NotProvisioned(DriverKind),

    /// Unknown driver identifier in settings or configuration
    #[error("Unknown driver `{0}`")]
    UnknownDriver(String),

    /// Outbound mail dispatch failed
    #[error("Failed to dispatch verification mail: {0}")]
    Dispatch(String),

    /// Settings store unreachable
    #[error("Settings store unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored TOTP secret could not be decoded
    #[error("Invalid TOTP secret: {0}")]
    InvalidSecret(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
