//! Local settings. Runs without a session.

use crate::cli::ConfigCommand;
use crate::error::CamviewError;

use camview_core::config::AppConfig;
use camview_core::paths::CamviewPaths;

use std::io::Write;

/// Changes apply to `config.json`; an environment override such as
/// `CAMVIEW_BASE_URL` still wins on the next run.
pub fn config(
    config: &mut AppConfig,
    paths: &CamviewPaths,
    command: ConfigCommand,
    out: &mut impl Write,
) -> Result<(), CamviewError> {
    match command {
        ConfigCommand::Show => {}
        ConfigCommand::Set {
            base_url,
            request_timeout_secs,
            max_cameras,
            page_size,
            default_confidence,
        } => {
            // Start from the file, not from the env-adjusted values in memory
            let mut stored = AppConfig::load(&paths.config_dir)?;
            if let Some(base_url) = base_url {
                stored.server.base_url = base_url;
            }
            if let Some(secs) = request_timeout_secs {
                stored.server.request_timeout_secs = secs;
            }
            if let Some(max_cameras) = max_cameras {
                stored.live.max_cameras = max_cameras;
            }
            if let Some(page_size) = page_size {
                stored.ui.page_size = page_size;
            }
            if let Some(confidence) = default_confidence {
                stored.ui.default_confidence = confidence;
            }
            stored.save(&paths.config_dir)?;
            *config = stored;
        }
    }

    writeln!(out, "Config dir: {}", paths.config_dir.display())?;
    writeln!(out, "Data dir: {}", paths.data_dir.display())?;
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| CamviewError::camview(format!("Cannot render config: {e}")))?;
    writeln!(out, "{json}")?;
    Ok(())
}
