pub mod env;

pub use env::{EnvLoadResult, try_load_dotenv};

use crate::error::config::ConfigError;
use crate::{DEFAULT_SERVER_BASE_URL, MAX_LIVE_CAMERAS};

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;

pub const BASE_URL_ENV: &str = "CAMVIEW_BASE_URL";

const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveConfig {
    #[serde(default = "default_max_cameras")]
    pub max_cameras: usize,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            max_cameras: default_max_cameras(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiPreferences {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_confidence")]
    pub default_confidence: f32,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_confidence: default_confidence(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub live: LiveConfig,

    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: ServerConfig::default(),
            live: LiveConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_base_url() -> String {
    DEFAULT_SERVER_BASE_URL.to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_max_cameras() -> usize {
    MAX_LIVE_CAMERAS
}
fn default_page_size() -> usize {
    12
}
fn default_confidence() -> f32 {
    0.5
}

// ============================================
// IMPLEMENTATION
// ============================================

impl AppConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AppConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::Read {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// Uses temp file + rename so a crash never leaves a half-written file.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Encode {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Apply `CAMVIEW_BASE_URL` on top of the file values.
    ///
    /// The result is validated again; an override with a bad URL is an error,
    /// not a silent fallback.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) => {
                info!("Using {BASE_URL_ENV} override: {url}");
                self.server.base_url = url;
                self.validate().map_err(|e| ConfigError::EnvOverride {
                    location: ErrorLocation::from(Location::caller()),
                    variable: BASE_URL_ENV.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(std::env::VarError::NotPresent) => Ok(()),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::EnvOverride {
                location: ErrorLocation::from(Location::caller()),
                variable: BASE_URL_ENV.to_string(),
                reason: "contains invalid unicode".to_string(),
            }),
        }
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        self.base_url()?;

        let timeout = self.server.request_timeout_secs;
        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&timeout) {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid request timeout: {timeout}s (must be {MIN_REQUEST_TIMEOUT_SECS}-{MAX_REQUEST_TIMEOUT_SECS})"
                ),
            });
        }

        if self.live.max_cameras == 0 || self.live.max_cameras > MAX_LIVE_CAMERAS {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid max_cameras: {} (must be 1-{MAX_LIVE_CAMERAS})",
                    self.live.max_cameras
                ),
            });
        }

        if self.ui.page_size == 0 {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: "page_size must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.ui.default_confidence) {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid default_confidence: {} (must be 0.0-1.0)",
                    self.ui.default_confidence
                ),
            });
        }

        Ok(())
    }

    /// Parsed backend base URL, always ending in `/` so relative joins append.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.server.base_url.trim();

        if !raw.starts_with("http://") && !raw.starts_with("https://") {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL format: {raw}"),
            });
        }

        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };

        Url::parse(&normalized).map_err(|e| ConfigError::Validation {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid URL {raw}: {e}"),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
