use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Failures of the durable token store.
#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("Token Read Error: {path}: {source} {location}")]
    Read {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Token Write Error: {path}: {source} {location}")]
    Write {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Token Remove Error: {path}: {source} {location}")]
    Remove {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Data Directory Error: {message} {location}")]
    DataDirectory {
        message: String,
        location: ErrorLocation,
    },
}
