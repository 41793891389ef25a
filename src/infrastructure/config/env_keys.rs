//! Mapping between dotted configuration key paths and environment variables.

use figment::value::{Dict, Value};
use serde::Serialize;

use super::coercion::FieldKind;
use crate::domain::models::config::Config;

/// Separator between segments of a dotted key path
pub const KEY_SEPARATOR: char = '.';

/// Separator between segments of an environment variable name
pub const ENV_SEPARATOR: char = '_';

/// Environment variable name for a dotted key path.
///
/// `app.port` becomes `APP_PORT`; input case does not matter.
pub fn env_var_name(key_path: &str) -> String {
    key_path
        .replace(KEY_SEPARATOR, &ENV_SEPARATOR.to_string())
        .to_uppercase()
}

/// A leaf configuration key and the kind of value it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigKey {
    /// Dotted key path, e.g. `security.rate_limit.enabled`
    pub path: String,

    /// Kind used to coerce environment values for this key
    pub kind: FieldKind,
}

impl ConfigKey {
    /// Environment variable that overrides this key
    pub fn env_var(&self) -> String {
        env_var_name(&self.path)
    }
}

/// Every leaf key of [`Config`], sorted by path.
///
/// Derived from the serialized default configuration.
pub fn config_keys() -> Result<Vec<ConfigKey>, figment::Error> {
    let mut keys = Vec::new();
    if let Value::Dict(_, root) = Value::serialize(Config::default())? {
        walk_dict("", &root, &mut keys);
    }
    Ok(keys)
}

fn walk_dict(prefix: &str, dict: &Dict, keys: &mut Vec<ConfigKey>) {
    for (name, value) in dict {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}{KEY_SEPARATOR}{name}")
        };

        if let Value::Dict(_, inner) = value {
            walk_dict(&path, inner, keys);
        } else if let Some(kind) = FieldKind::of(value) {
            keys.push(ConfigKey { path, kind });
        }
    }
}
