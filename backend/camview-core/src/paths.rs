//! Platform-aware detection of camview's data and config directories.
//!
//! Lookup order:
//! 1. `CAMVIEW_DATA_DIR` environment variable (explicit override, used for both)
//! 2. Platform-specific directories via the `dirs` crate
//! 3. `$HOME/.local/share/camview` fallback
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::error::StorageError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const DATA_DIR_ENV: &str = "CAMVIEW_DATA_DIR";
const APP_DIR_NAME: &str = "camview";

/// Fixed file name of the durable session token.
pub const TOKEN_FILE_NAME: &str = "token";

#[derive(Debug, Clone)]
pub struct CamviewPaths {
    /// Directory holding the session token.
    pub data_dir: PathBuf,
    /// Directory holding `config.json`.
    pub config_dir: PathBuf,
    /// How the paths were determined.
    pub source: PathSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Given by the caller, e.g. a command-line flag.
    Explicit,
    EnvVar,
    PlatformDefault,
    HomeFallback,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Explicit => write!(f, "explicit path"),
            PathSource::EnvVar => write!(f, "{DATA_DIR_ENV}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::HomeFallback => write!(f, "home fallback"),
        }
    }
}

impl CamviewPaths {
    pub fn token_file(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE_NAME)
    }
}

/// Detect camview directories.
///
/// # Errors
/// Returns [`StorageError::DataDirectory`] if no valid path can be determined.
pub fn detect_paths() -> Result<CamviewPaths, StorageError> {
    if let Ok(custom_dir) = env::var(DATA_DIR_ENV) {
        let dir = PathBuf::from(&custom_dir);
        info!("Using {DATA_DIR_ENV} override: {:?}", dir);

        return Ok(CamviewPaths {
            data_dir: dir.clone(),
            config_dir: dir,
            source: PathSource::EnvVar,
        });
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let data_dir = data_dir.join(APP_DIR_NAME);
        let config_dir = dirs::config_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| data_dir.clone());

        debug!("Platform data dir: {:?}, config dir: {:?}", data_dir, config_dir);

        return Ok(CamviewPaths {
            data_dir,
            config_dir,
            source: PathSource::PlatformDefault,
        });
    }

    if let Ok(home) = env::var("HOME") {
        let dir = PathBuf::from(home).join(".local/share").join(APP_DIR_NAME);
        warn!("Using home fallback path: {:?}", dir);

        return Ok(CamviewPaths {
            data_dir: dir.clone(),
            config_dir: dir,
            source: PathSource::HomeFallback,
        });
    }

    Err(StorageError::DataDirectory {
        message: format!(
            "Cannot determine camview data directory. Set {DATA_DIR_ENV} environment variable."
        ),
        location: ErrorLocation::from(Location::caller()),
    })
}
