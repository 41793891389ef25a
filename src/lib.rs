//! iamgate - configuration for an IAM-fronting HTTP gateway
//!
//! Loads a typed [`Config`] from `config.yaml` in a directory, with
//! environment variables overriding file values. A dotted key path maps to
//! an upper-case variable name with `.` replaced by `_`, so `app.port` is
//! overridden by `APP_PORT` and `security.rate_limit.enabled` by
//! `SECURITY_RATE_LIMIT_ENABLED`.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration value types and accessors
//! - **Infrastructure Layer** (`infrastructure`): loading, env overlay, logging
//! - **CLI Layer** (`cli`): the `iamgate` command-line tool
//!
//! # Example
//!
//! ```no_run
//! let config = iamgate::load_config("./configs")?;
//! if config.app.is_development() {
//!     println!("{} on port {}", config.app.name, config.app.port);
//! }
//! # Ok::<(), iamgate::ConfigError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{
    AppConfig, Config, CorsConfig, IamConfig, KeycloakConfig, LogConfig, RateLimitConfig,
    SecurityConfig,
};
pub use infrastructure::config::{
    config_keys, env_var_name, load_config, ConfigError, ConfigErrorKind, ConfigKey, ConfigLoader,
    FieldKind,
};
