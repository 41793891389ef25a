//! Configuration value types

pub mod config;

pub use config::{
    AppConfig, Config, CorsConfig, IamConfig, KeycloakConfig, LogConfig, RateLimitConfig,
    SecurityConfig, REDACTED,
};
