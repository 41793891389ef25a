//! Locating, reading and decoding the YAML configuration file.

use figment::providers::Serialized;
use figment::Figment;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::coercion::{parse_bool, parse_integer, FieldKind};
use super::env_keys::{config_keys, ConfigKey, KEY_SEPARATOR};
use super::env_overlay::EnvOverlay;
use crate::domain::models::config::Config;

/// Base name of the YAML configuration file
pub const CONFIG_FILE_NAME: &str = "config";

/// Extensions tried, in order, when locating the configuration file
pub const CONFIG_FILE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Environment file read from the working directory by default
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No `config.yaml` or `config.yml` in the search path
    #[error("config file not found: no config.yaml or config.yml in {}", .search_path.display())]
    FileNotFound { search_path: PathBuf },

    /// The file exists but could not be read
    #[error("error reading config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a valid YAML mapping
    #[error("error parsing config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment override does not match its field kind
    #[error("invalid value {value:?} in {env_var} for {key}: expected {kind}")]
    Coercion {
        key: String,
        env_var: String,
        value: String,
        kind: FieldKind,
    },

    /// Merged values do not fit the typed configuration
    #[error("error decoding config: {0}")]
    Decode(#[source] Box<figment::Error>),
}

/// Coarse classification of [`ConfigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// No configuration file in the search path
    FileNotFound,
    /// The file exists but could not be read or parsed
    Read,
    /// Merged values do not fit the typed configuration
    Decode,
}

impl ConfigError {
    /// Which stage of loading failed
    pub const fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::FileNotFound { .. } => ConfigErrorKind::FileNotFound,
            Self::Read { .. } | Self::Parse { .. } => ConfigErrorKind::Read,
            Self::Coercion { .. } | Self::Decode(_) => ConfigErrorKind::Decode,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Decode(Box::new(err))
    }
}

#[derive(Debug, Clone)]
enum EnvSource {
    Process,
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => match env::var(name) {
                Ok(value) => Some(value),
                Err(env::VarError::NotPresent) => None,
                Err(env::VarError::NotUnicode(_)) => {
                    warn!(env_var = name, "ignoring environment variable with non-UTF-8 value");
                    None
                }
            },
            Self::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

/// Load configuration from the `config` YAML file in `path`.
///
/// Shorthand for `ConfigLoader::new(path).load()`.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    ConfigLoader::new(path).load()
}

/// Configuration loader with environment overlay
///
/// Precedence (lowest to highest):
/// 1. Zero values for every field
/// 2. `<search_path>/config.yaml` (or `config.yml`)
/// 3. Environment variables named after the dotted key path (`app.port` -> `APP_PORT`)
///
/// A `.env` file is merged into the process environment first; its absence
/// is only a warning.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_path: PathBuf,
    env_file: Option<PathBuf>,
    env: EnvSource,
}

impl ConfigLoader {
    /// Loader searching `path` for the configuration file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            search_path: path.as_ref().to_path_buf(),
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            env: EnvSource::Process,
        }
    }

    /// Read the environment file from `path` instead of `./.env`
    #[must_use]
    pub fn env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip the environment file entirely
    #[must_use]
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Resolve overrides from `vars` instead of the process environment
    #[must_use]
    pub fn env_lookup<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = EnvSource::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Directory searched for the configuration file
    pub fn search_path(&self) -> &Path {
        &self.search_path
    }

    /// Load, overlay and decode the configuration
    pub fn load(&self) -> Result<Config, ConfigError> {
        self.load_env_file();

        let file = self.locate()?;
        let mut document = read_document(&file)?;

        let keys = config_keys()?;
        conform_document(&mut document, &keys);
        let overlay = EnvOverlay::collect(&keys, |name| self.env.get(name))?;
        let overrides = overlay.applied().len();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Serialized::defaults(document))
            .merge(overlay)
            .extract()?;

        info!(
            path = %file.display(),
            env_overrides = overrides,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Path of the configuration file inside the search path
    pub fn locate(&self) -> Result<PathBuf, ConfigError> {
        CONFIG_FILE_EXTENSIONS
            .iter()
            .map(|ext| {
                self.search_path
                    .join(format!("{CONFIG_FILE_NAME}.{ext}"))
            })
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ConfigError::FileNotFound {
                search_path: self.search_path.clone(),
            })
    }

    /// Merge the environment file into the process environment.
    ///
    /// Existing variables win. A missing or unreadable file is only logged.
    pub fn load_env_file(&self) {
        let Some(ref path) = self.env_file else {
            return;
        };

        match dotenvy::from_path(path) {
            Ok(()) => debug!(path = %path.display(), "loaded environment file"),
            Err(err) if err.not_found() => {
                warn!(path = %path.display(), "no environment file found");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "error reading environment file");
            }
        }
    }
}

/// Read and syntax-check the YAML file, dropping null entries.
///
/// An empty file is an empty mapping; any other non-mapping document is
/// rejected as a parse error.
fn read_document(path: &Path) -> Result<serde_yaml::Mapping, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let document: serde_yaml::Value = serde_yaml::from_str(&contents).map_err(parse_error)?;
    if document.is_null() {
        return Ok(serde_yaml::Mapping::new());
    }

    match strip_nulls(document) {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        other => serde_yaml::from_value(other).map_err(parse_error),
    }
}

/// Reshape scalar leaves of the document to the kind of their field.
///
/// Numbers and booleans become strings on string fields; strings are
/// parsed on integer and boolean fields. A value that cannot be reshaped is
/// left as is and reported by decoding.
fn conform_document(document: &mut serde_yaml::Mapping, keys: &[ConfigKey]) {
    for key in keys {
        if let Some(value) = leaf_mut(document, &key.path) {
            if conform_scalar(key.kind, value) {
                debug!(key = %key.path, kind = %key.kind, "coerced file value");
            }
        }
    }
}

fn leaf_mut<'a>(
    document: &'a mut serde_yaml::Mapping,
    path: &str,
) -> Option<&'a mut serde_yaml::Value> {
    let mut segments = path.split(KEY_SEPARATOR);
    let mut current = document.get_mut(segments.next()?)?;
    for segment in segments {
        current = current.as_mapping_mut()?.get_mut(segment)?;
    }
    Some(current)
}

fn conform_scalar(kind: FieldKind, value: &mut serde_yaml::Value) -> bool {
    use serde_yaml::Value as Yaml;

    let conformed = match (kind, &*value) {
        (FieldKind::String, Yaml::Number(number)) => Yaml::String(number.to_string()),
        (FieldKind::String, Yaml::Bool(flag)) => Yaml::String(flag.to_string()),
        (FieldKind::Integer, Yaml::String(raw)) => match parse_integer(raw) {
            Some(number) => Yaml::Number(number.into()),
            None => return false,
        },
        (FieldKind::Boolean, Yaml::String(raw)) => match parse_bool(raw) {
            Some(flag) => Yaml::Bool(flag),
            None => return false,
        },
        _ => return false,
    };

    *value = conformed;
    true
}

/// Remove null mapping entries so `cors:` with no body decodes as defaults
fn strip_nulls(value: serde_yaml::Value) -> serde_yaml::Value {
    match value {
        serde_yaml::Value::Mapping(mapping) => serde_yaml::Value::Mapping(
            mapping
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}
