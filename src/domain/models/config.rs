//! Typed configuration tree and its derived accessors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder printed instead of secret values
pub const REDACTED: &str = "[REDACTED]";

/// Main configuration structure for iamgate
///
/// Every section defaults to its zero value, so a sparse YAML file still
/// produces a fully populated tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Application identity and listener settings
    pub app: AppConfig,

    /// Identity provider settings
    pub iam: IamConfig,

    /// CORS and rate limiting
    pub security: SecurityConfig,

    /// Logging configuration
    pub logging: LogConfig,
}

impl Config {
    /// Whether the application runs in debug mode
    pub const fn is_debug(&self) -> bool {
        self.app.debug
    }

    /// Copy of this configuration safe to print or serialize for humans
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.iam.keycloak.client_secret.is_empty() {
            copy.iam.keycloak.client_secret = REDACTED.to_string();
        }
        copy
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    /// Service name
    pub name: String,

    /// Deployment environment, e.g. `development` or `production`
    pub environment: String,

    /// HTTP listen port
    pub port: i64,

    /// Debug mode toggle
    pub debug: bool,
}

impl AppConfig {
    /// True iff the environment is `development`, ignoring case
    pub fn is_development(&self) -> bool {
        self.environment.to_lowercase() == "development"
    }
}

/// IAM provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IamConfig {
    /// Identity-provider backend name, e.g. `keycloak`
    pub provider: String,

    /// Keycloak backend settings
    pub keycloak: KeycloakConfig,
}

impl IamConfig {
    /// Configured provider name, lower-cased
    pub fn current_provider(&self) -> String {
        self.provider.to_lowercase()
    }
}

/// Keycloak-specific configuration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct KeycloakConfig {
    /// Keycloak server base URL
    pub base_url: String,

    /// Realm name
    pub realm: String,

    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,
}

impl fmt::Debug for KeycloakConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.client_secret.is_empty() {
            ""
        } else {
            REDACTED
        };
        f.debug_struct("KeycloakConfig")
            .field("base_url", &self.base_url)
            .field("realm", &self.realm)
            .field("client_id", &self.client_id)
            .field("client_secret", &secret)
            .finish()
    }
}

/// Security configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SecurityConfig {
    /// Cross-origin resource sharing
    pub cors: CorsConfig,

    /// Request rate limiting
    pub rate_limit: RateLimitConfig,
}

/// CORS configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CorsConfig {
    /// Origins allowed to make cross-origin requests
    pub allowed_origins: Vec<String>,

    /// Allowed HTTP methods
    pub allowed_methods: Vec<String>,

    /// Allowed request headers
    pub allowed_headers: Vec<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Whether rate limiting is active
    pub enabled: bool,

    /// Requests per second allowed
    pub requests_per_second: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log format: json, pretty, or anything else for compact text
    pub format: String,
}
