//! Infrastructure layer module
//!
//! - Configuration loading (YAML file, `.env`, environment overlay)
//! - Logging setup

pub mod config;
pub mod logging;
