//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber, driven by the
//! `logging` section of the loaded configuration.

pub mod logger;

pub use logger::{bootstrap_subscriber, init, LogFormat};
