//! Startup wiring shared by every command.

use crate::error::CamviewError;

use camview_core::auth::{FileTokenStore, SessionManager};
use camview_core::config::AppConfig;
use camview_core::live::WsConnector;
use camview_core::paths::{CamviewPaths, PathSource, detect_paths};
use camview_core::shell::ViewShell;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

const LOG_DIR_NAME: &str = "logs";

/// Directories for this run. `--config-dir` wins over detection.
pub fn resolve_paths(config_dir: Option<&Path>) -> Result<CamviewPaths, CamviewError> {
    match config_dir {
        Some(dir) => Ok(CamviewPaths {
            data_dir: dir.to_path_buf(),
            config_dir: dir.to_path_buf(),
            source: PathSource::Explicit,
        }),
        None => Ok(detect_paths()?),
    }
}

pub fn log_dir(paths: &CamviewPaths) -> PathBuf {
    paths.data_dir.join(LOG_DIR_NAME)
}

pub struct AppContext {
    pub config: AppConfig,
    pub paths: CamviewPaths,
    pub shell: ViewShell<WsConnector>,
}

impl AppContext {
    /// Load the config, build the session over the token file and restore any
    /// stored session.
    ///
    /// # Errors
    ///
    /// A corrupt config file, a bad `CAMVIEW_BASE_URL` or an HTTP client that
    /// cannot be built. An unreachable backend is not an error here; the
    /// session simply stays empty.
    pub async fn start(paths: CamviewPaths) -> Result<Self, CamviewError> {
        debug!(
            "Config dir {:?}, data dir {:?} ({})",
            paths.config_dir, paths.data_dir, paths.source
        );

        let mut config = AppConfig::load(&paths.config_dir)?;
        config.apply_env_overrides()?;

        let store = Arc::new(FileTokenStore::new(paths.token_file()));
        let session = SessionManager::from_config(&config, store)?;
        let connector = Arc::new(WsConnector::new(config.base_url()?));

        let mut shell = ViewShell::new(session, connector, config.live.max_cameras);
        let decision = shell.init().await;
        info!("Session restored: {decision:?}");

        Ok(Self {
            config,
            paths,
            shell,
        })
    }
}
