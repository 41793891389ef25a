use iamgate::{load_config, Config, ConfigError, ConfigErrorKind, ConfigLoader};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn isolated(dir: impl Into<PathBuf>) -> ConfigLoader {
    ConfigLoader::new(dir.into())
        .without_env_file()
        .env_lookup(Vec::<(String, String)>::new())
}

#[test]
fn test_full_fixture_maps_every_field() {
    let config = isolated(fixture("full")).load().unwrap();

    assert_eq!(config.app.name, "iamgate");
    assert_eq!(config.app.environment, "Development");
    assert_eq!(config.app.port, 8080);
    assert!(config.app.debug);

    assert_eq!(config.iam.provider, "KeyCloak");
    assert_eq!(config.iam.keycloak.base_url, "http://localhost:8180");
    assert_eq!(config.iam.keycloak.realm, "gateway");
    assert_eq!(config.iam.keycloak.client_id, "iamgate-api");
    assert_eq!(config.iam.keycloak.client_secret, "local-dev-secret");

    assert_eq!(
        config.security.cors.allowed_origins,
        vec!["http://localhost:3000", "https://app.example.com"]
    );
    assert_eq!(
        config.security.cors.allowed_methods,
        vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"]
    );
    assert_eq!(
        config.security.cors.allowed_headers,
        vec!["Authorization", "Content-Type"]
    );
    assert!(config.security.rate_limit.enabled);
    assert_eq!(config.security.rate_limit.requests_per_second, 50);

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_derived_accessors_on_fixture() {
    let config = isolated(fixture("full")).load().unwrap();

    assert_eq!(config.iam.current_provider(), "keycloak");
    assert!(config.app.is_development());
    assert!(config.is_debug());
}

#[test]
fn test_sparse_fixture_defaults_missing_sections() {
    let config = isolated(fixture("sparse")).load().unwrap();

    assert_eq!(config.app.name, "sparse");
    assert!(!config.app.is_development());
    assert_eq!(config.app.port, 0);
    assert!(config.security.cors.allowed_origins.is_empty());
    assert!(!config.security.rate_limit.enabled);
    assert_eq!(config.iam, Default::default());
    assert_eq!(config.logging, Default::default());
}

#[test]
fn test_env_strictly_overrides_every_kind() {
    let config = isolated(fixture("full"))
        .env_lookup([
            ("APP_NAME", "overridden"),
            ("APP_PORT", "9443"),
            ("APP_DEBUG", "False"),
            ("IAM_KEYCLOAK_REALM", "staging"),
            ("SECURITY_CORS_ALLOWED_HEADERS", "X-Request-Id , Authorization"),
            ("SECURITY_RATE_LIMIT_REQUESTS_PER_SECOND", "5"),
            ("LOGGING_FORMAT", "pretty"),
        ])
        .load()
        .unwrap();

    assert_eq!(config.app.name, "overridden");
    assert_eq!(config.app.port, 9443);
    assert!(!config.app.debug);
    assert_eq!(config.iam.keycloak.realm, "staging");
    assert_eq!(
        config.security.cors.allowed_headers,
        vec!["X-Request-Id", "Authorization"]
    );
    assert_eq!(config.security.rate_limit.requests_per_second, 5);
    assert_eq!(config.logging.format, "pretty");

    // file values survive where nothing overrides them
    assert_eq!(config.iam.keycloak.client_id, "iamgate-api");
    assert!(config.security.rate_limit.enabled);
}

#[test]
fn test_non_numeric_override_is_decode_error() {
    let err = isolated(fixture("full"))
        .env_lookup([("SECURITY_RATE_LIMIT_REQUESTS_PER_SECOND", "lots")])
        .load()
        .unwrap_err();

    assert_eq!(err.kind(), ConfigErrorKind::Decode);
    assert!(err.to_string().contains("SECURITY_RATE_LIMIT_REQUESTS_PER_SECOND"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let result = isolated(dir.path()).load();

    match result {
        Err(ConfigError::FileNotFound { search_path }) => assert_eq!(search_path, dir.path()),
        other => panic!("Expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_malformed_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yaml"), "app: [\n  name: : :\n").unwrap();

    let err = isolated(dir.path()).load().unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Read);
    assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn test_process_env_overrides_file() {
    let config = temp_env::with_vars(
        [
            ("APP_PORT", Some("7070")),
            ("SECURITY_RATE_LIMIT_ENABLED", Some("0")),
        ],
        || {
            ConfigLoader::new(fixture("full"))
                .without_env_file()
                .load()
                .unwrap()
        },
    );

    assert_eq!(config.app.port, 7070);
    assert!(!config.security.rate_limit.enabled);
}

#[test]
fn test_load_config_without_env_file_succeeds() {
    // the crate root has no .env file
    let config: Config = temp_env::with_vars_unset(["APP_NAME", "APP_PORT"], || {
        load_config(fixture("full")).unwrap()
    });

    assert_eq!(config.app.name, "iamgate");
}

#[test]
fn test_env_file_values_reach_the_overlay() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join("test.env");
    fs::write(&env_path, "APP_NAME=from-dotenv\nLOGGING_LEVEL=debug\n").unwrap();

    let config = temp_env::with_vars_unset(["APP_NAME", "LOGGING_LEVEL"], || {
        ConfigLoader::new(fixture("full"))
            .env_file(&env_path)
            .load()
            .unwrap()
    });

    assert_eq!(config.app.name, "from-dotenv");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_env_file_does_not_override_process_env() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join("test.env");
    fs::write(&env_path, "IAM_PROVIDER=from-dotenv\n").unwrap();

    let config = temp_env::with_var("IAM_PROVIDER", Some("from-process"), || {
        ConfigLoader::new(fixture("full"))
            .env_file(&env_path)
            .load()
            .unwrap()
    });

    assert_eq!(config.iam.provider, "from-process");
}

#[test]
fn test_unreadable_env_file_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join("broken.env");
    fs::write(&env_path, "THIS IS NOT A VALID LINE\n").unwrap();

    let config = isolated(fixture("full")).env_file(&env_path).load().unwrap();
    assert_eq!(config.app.name, "iamgate");
}

#[test]
fn test_loosely_typed_fixture_is_coerced() {
    let config = isolated(fixture("loose")).load().unwrap();

    assert_eq!(config.app.name, "2024");
    assert_eq!(config.app.port, 8443);
    assert!(config.is_debug());
    assert_eq!(config.iam.keycloak.realm, "2024");
    assert_eq!(config.iam.keycloak.client_id, "42");
    assert_eq!(config.iam.keycloak.client_secret, "123456");
    assert!(config.security.rate_limit.enabled);
    assert_eq!(config.security.rate_limit.requests_per_second, 0);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_process_variable_is_ignored() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let value = OsString::from_vec(vec![0x38, 0x30, 0xff]);
    let config = temp_env::with_var("APP_PORT", Some(value), || {
        ConfigLoader::new(fixture("full"))
            .without_env_file()
            .load()
            .unwrap()
    });

    assert_eq!(config.app.port, 8080);
}
