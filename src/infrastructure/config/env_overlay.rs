//! Figment provider carrying coerced environment overrides.

use figment::value::{Dict, Map, Value};
use figment::{Error, Metadata, Profile, Provider};
use tracing::debug;

use super::env_keys::{ConfigKey, KEY_SEPARATOR};
use super::loader::ConfigError;

/// Figment provider holding environment overrides for known config keys.
///
/// Values are coerced when collected; a malformed variable is reported
/// together with the key it targets.
#[derive(Debug, Clone, Default)]
pub struct EnvOverlay {
    overrides: Dict,
    applied: Vec<String>,
}

impl EnvOverlay {
    /// Collect overrides for `keys`, reading variables through `lookup`.
    ///
    /// Unset and empty variables are skipped.
    pub fn collect<F>(keys: &[ConfigKey], lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overlay = Self::default();

        for key in keys {
            let env_var = key.env_var();
            let Some(raw) = lookup(&env_var).filter(|raw| !raw.is_empty()) else {
                continue;
            };

            let value = key.kind.coerce(&raw).ok_or_else(|| ConfigError::Coercion {
                key: key.path.clone(),
                env_var: env_var.clone(),
                value: raw.clone(),
                kind: key.kind,
            })?;

            debug!(env_var = %env_var, key = %key.path, kind = %key.kind, "environment override");
            insert_path(&mut overlay.overrides, &key.path, value);
            overlay.applied.push(env_var);
        }

        Ok(overlay)
    }

    /// Names of the variables that produced an override
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// True when no variable overrode anything
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

fn insert_path(target: &mut Dict, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split(KEY_SEPARATOR).collect();
    let Some(leaf) = segments.pop() else {
        return;
    };

    let mut current = target;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::from(Dict::new()));
        if !matches!(entry, Value::Dict(..)) {
            *entry = Value::from(Dict::new());
        }
        let Value::Dict(_, inner) = entry else {
            return;
        };
        current = inner;
    }

    current.insert(leaf.to_string(), value);
}

impl Provider for EnvOverlay {
    fn metadata(&self) -> Metadata {
        Metadata::named("environment variables")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut data = Map::new();
        data.insert(Profile::Default, self.overrides.clone());
        Ok(data)
    }
}
