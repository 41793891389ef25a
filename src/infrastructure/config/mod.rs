//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading (`config.yaml` / `config.yml`)
//! - `.env` file merged into the process environment
//! - Environment variable overrides keyed by dotted path (`app.port` -> `APP_PORT`)
//! - Per-kind coercion of environment values

pub mod coercion;
pub mod env_keys;
pub mod env_overlay;
pub mod loader;

pub use coercion::FieldKind;
pub use env_keys::{config_keys, env_var_name, ConfigKey};
pub use env_overlay::EnvOverlay;
pub use loader::{load_config, ConfigError, ConfigErrorKind, ConfigLoader};
