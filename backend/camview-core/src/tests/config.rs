use crate::config::AppConfig;
use crate::error::ConfigError;

use tempfile::TempDir;

/// **VALUE**: Verifies a missing config file yields validated defaults.
///
/// **WHY THIS MATTERS**: First run has no config; the client must still reach
/// the default local backend.
#[test]
fn given_no_config_file_when_loaded_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8000/");
    assert_eq!(config.live.max_cameras, 4);
    assert_eq!(config.ui.page_size, 12);
    assert_eq!(config.request_timeout().as_secs(), 30);
}

#[test]
fn given_saved_config_when_loaded_then_same_values() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.server.base_url = "https://cams.example.com".to_string();
    config.live.max_cameras = 2;

    config.save(dir.path()).unwrap();
    let loaded = AppConfig::load(dir.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists());
}

/// **VALUE**: Verifies a corrupt file is an error, not silently replaced.
///
/// **BUG THIS CATCHES**: Would catch a load that falls back to defaults on
/// parse failure and then overwrites the user's file on the next save.
#[test]
fn given_corrupt_config_when_loaded_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let result = AppConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn given_partial_config_when_loaded_then_missing_sections_defaulted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"server":{"base_url":"http://10.0.0.5:8000"}}"#,
    )
    .unwrap();

    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config.base_url().unwrap().as_str(), "http://10.0.0.5:8000/");
    assert_eq!(config.server.request_timeout_secs, 30);
    assert_eq!(config.live.max_cameras, 4);
}

/// **VALUE**: Verifies values outside their bounds are rejected.
#[test]
fn given_out_of_range_values_when_validated_then_validation_error() {
    let mut too_many = AppConfig::default();
    too_many.live.max_cameras = 5;

    let mut bad_scheme = AppConfig::default();
    bad_scheme.server.base_url = "ws://localhost:8000".to_string();

    let mut no_timeout = AppConfig::default();
    no_timeout.server.request_timeout_secs = 0;

    let mut bad_confidence = AppConfig::default();
    bad_confidence.ui.default_confidence = 1.5;

    for config in [too_many, bad_scheme, no_timeout, bad_confidence] {
        assert!(
            matches!(config.validate(), Err(ConfigError::Validation { .. })),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn given_base_url_with_path_when_normalized_then_trailing_slash() {
    let mut config = AppConfig::default();
    config.server.base_url = "https://host/api-gw".to_string();

    let url = config.base_url().unwrap();

    assert_eq!(url.as_str(), "https://host/api-gw/");
    assert_eq!(url.join("cameras").unwrap().path(), "/api-gw/cameras");
}
