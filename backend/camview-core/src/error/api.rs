//! Errors for authenticated backend calls.
//!
//! - A missing token is its own variant so callers can tell "never logged in"
//!   apart from "the backend rejected the token".
//! - HTTP status codes are stored directly, never parsed back out of messages.
//! - 401 is surfaced, not handled: there is no logout-on-401 here.

use crate::error::storage::StorageError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Missing Token Error: no authentication token available {location}")]
    MissingToken { location: ErrorLocation },

    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Status Error: HTTP {status_code} - {message} {location}")]
    Status {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    #[track_caller]
    pub fn missing_token() -> Self {
        ApiError::MissingToken {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a non-success HTTP response.
    #[track_caller]
    pub fn from_status(status_code: u16, body: impl Into<String>) -> Self {
        ApiError::Status {
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True when the backend rejected the bearer token.
    ///
    /// Callers decide what to do with it (typically: log out and show the login
    /// form).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status_code, .. } if status_code.is_unauthorized())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Get error category for logs.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::MissingToken { .. } => "missing_token",
            ApiError::Http { is_timeout: true, .. } => "timeout",
            ApiError::Http { is_connection: true, .. } => "connection",
            ApiError::Http { .. } => "network",
            ApiError::Status { status_code, .. } if status_code.is_unauthorized() => {
                "unauthorized"
            }
            ApiError::Status { status_code, .. } if status_code.is_forbidden() => "forbidden",
            ApiError::Status { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            ApiError::Status { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            ApiError::Status { .. } => "status",
            ApiError::Json { .. } => "data",
            ApiError::UrlParse { .. } => "url",
            ApiError::Validation { .. } => "validation",
            ApiError::Storage(_) => "storage",
        }
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        // Body decode failures carry no status and are data errors, not transport errors
        if error.is_decode() {
            return ApiError::Json {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if let Some(status) = error.status() {
            return ApiError::Status {
                status_code: HttpStatusCode(status.as_u16()),
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        ApiError::Http {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
