use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

/// Failures loading, validating or saving `config.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid config JSON. Never replaced by defaults.
    #[error("Config Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Encode Error: {reason} {location}")]
    Encode {
        location: ErrorLocation,
        reason: String,
    },

    /// A value out of range: version, base URL scheme, timeout or camera cap.
    #[error("Config Validation Error: {reason} {location}")]
    Validation {
        location: ErrorLocation,
        reason: String,
    },

    /// `CAMVIEW_BASE_URL` or another override could not be applied.
    #[error("Config Environment Error: {variable}: {reason} {location}")]
    EnvOverride {
        location: ErrorLocation,
        variable: String,
        reason: String,
    },
}
