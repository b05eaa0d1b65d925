use camview_core::config::{AppConfig, BASE_URL_ENV};
use camview_core::error::ConfigError;
use camview_core::paths::{DATA_DIR_ENV, PathSource, detect_paths};

use serial_test::serial;

fn set_env(key: &str, value: &str) {
    // SAFETY: tests touching the environment are #[serial]
    unsafe { std::env::set_var(key, value) };
}

fn remove_env(key: &str) {
    // SAFETY: tests touching the environment are #[serial]
    unsafe { std::env::remove_var(key) };
}

/// **VALUE**: Verifies `CAMVIEW_BASE_URL` overrides the file value.
///
/// **WHY THIS MATTERS**: Deployments point the client at a backend through
/// `.env` without editing the config file.
#[test]
#[serial]
fn given_base_url_env_when_overrides_applied_then_env_wins() {
    set_env(BASE_URL_ENV, "https://nvr.example.com");
    let mut config = AppConfig::default();

    let result = config.apply_env_overrides();
    remove_env(BASE_URL_ENV);

    result.unwrap();
    assert_eq!(
        config.base_url().unwrap().as_str(),
        "https://nvr.example.com/"
    );
}

/// **BUG THIS CATCHES**: Would catch a bad override being silently ignored,
/// leaving the client talking to the default backend.
#[test]
#[serial]
fn given_invalid_base_url_env_when_overrides_applied_then_error() {
    set_env(BASE_URL_ENV, "nvr.example.com");
    let mut config = AppConfig::default();

    let result = config.apply_env_overrides();
    remove_env(BASE_URL_ENV);

    assert!(matches!(result, Err(ConfigError::EnvOverride { .. })));
}

#[test]
#[serial]
fn given_data_dir_env_when_detecting_paths_then_env_dir_used_for_token() {
    let dir = tempfile::TempDir::new().unwrap();
    set_env(DATA_DIR_ENV, dir.path().to_str().unwrap());

    let paths = detect_paths();
    remove_env(DATA_DIR_ENV);

    let paths = paths.unwrap();
    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.token_file(), dir.path().join("token"));
    assert_eq!(paths.config_dir, dir.path());
}
