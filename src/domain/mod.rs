//! Domain layer for iamgate
//!
//! Plain configuration value types shared read-only by every subsystem.

pub mod models;
