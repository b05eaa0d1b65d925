use camview_core::error::{ApiError, AuthError, ConfigError, CoreError, ShellError, StorageError};

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by `camview` commands.
///
/// Structured and serializable so `--json` callers get the same information
/// as the terminal, location included.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CamviewError {
    /// Error from this app (arguments, output files, startup)
    #[error("Camview Error: {message} {location}")]
    Camview {
        message: String,
        location: ErrorLocation,
    },

    /// Error from camview-core operations
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Login refused or no session
    #[error("Authentication Error: {message} {location}")]
    Authentication {
        message: String,
        location: ErrorLocation,
    },

    /// Session role too low for the command
    #[error("Unauthorized Error: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },
}

impl CamviewError {
    #[track_caller]
    pub fn camview(message: impl Into<String>) -> Self {
        CamviewError::Camview {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CamviewError::Camview { .. } => 1,
            CamviewError::Core { .. } => 2,
            CamviewError::Authentication { .. } => 3,
            CamviewError::Unauthorized { .. } => 4,
        }
    }
}

impl From<CoreError> for CamviewError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Auth(e) => CamviewError::from(e),
            CoreError::Shell(e) => CamviewError::from(e),
            CoreError::Api(e) => CamviewError::from(e),
            other => CamviewError::Core {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<AuthError> for CamviewError {
    #[track_caller]
    fn from(error: AuthError) -> Self {
        CamviewError::Authentication {
            message: error.user_message(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ShellError> for CamviewError {
    #[track_caller]
    fn from(error: ShellError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            ShellError::NotAuthenticated { .. } => CamviewError::Authentication {
                message: "Not logged in. Run `camview login <username> <password>` first."
                    .to_string(),
                location,
            },
            ShellError::Unauthorized { tab, .. } => CamviewError::Unauthorized {
                message: format!("Your role cannot open {tab}"),
                location,
            },
            other => CamviewError::Core {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<ApiError> for CamviewError {
    #[track_caller]
    fn from(error: ApiError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if error.is_unauthorized() {
            return CamviewError::Authentication {
                message: "Session expired. Log in again.".to_string(),
                location,
            };
        }
        if let ApiError::MissingToken { .. } = error {
            return CamviewError::Authentication {
                message: "Not logged in".to_string(),
                location,
            };
        }
        CamviewError::Core {
            message: error.to_string(),
            location,
        }
    }
}

impl From<StorageError> for CamviewError {
    #[track_caller]
    fn from(error: StorageError) -> Self {
        CamviewError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for CamviewError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        CamviewError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for CamviewError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        CamviewError::Camview {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
