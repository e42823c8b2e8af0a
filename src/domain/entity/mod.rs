//! Entity Module

pub mod group;
pub mod user;
