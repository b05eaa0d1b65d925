//! Error types for login and session restore.
//!
//! Login never throws past the session manager: every failure is one of these
//! variants and the caller renders it inline. Invalid credentials keep the
//! backend's `detail` text so it can be shown as-is.

use crate::error::storage::StorageError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use serde::Deserialize;
use thiserror::Error as ThisError;

/// Shown when a 4xx login response carries no `detail`.
pub const DEFAULT_LOGIN_FAILURE_DETAIL: &str = "Authentication failed";

#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Invalid Credentials: HTTP {status_code} - {detail} {location}")]
    InvalidCredentials {
        detail: String,
        status_code: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    Server {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Protocol Error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl AuthError {
    #[track_caller]
    pub fn protocol(message: impl Into<String>) -> Self {
        AuthError::Protocol {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_decode() {
            return AuthError::Protocol {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        AuthError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a non-success login response.
    ///
    /// 4xx means the backend looked at the credentials and refused them; the
    /// `detail` field of a JSON body is kept when present. Anything else is a
    /// server failure.
    #[track_caller]
    pub fn from_http_response(status_code: u16, body: &str) -> Self {
        let status_code = HttpStatusCode(status_code);

        if status_code.is_client_error() {
            let detail = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| DEFAULT_LOGIN_FAILURE_DETAIL.to_string());

            return AuthError::InvalidCredentials {
                detail,
                status_code,
                location: ErrorLocation::from(Location::caller()),
            };
        }

        AuthError::Server {
            status_code,
            message: body.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials { .. })
    }

    /// User-facing text for an inline alert.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials { detail, .. } => detail.clone(),
            AuthError::Server { status_code, .. } => {
                format!("Server error (HTTP {status_code})")
            }
            AuthError::Network { .. } => "Cannot reach the server".to_string(),
            AuthError::Protocol { .. } => "Unexpected response from the server".to_string(),
            AuthError::UrlParse { .. } => "Invalid server address".to_string(),
            AuthError::Storage(_) => "Cannot store the session token".to_string(),
        }
    }

    /// Get error category for logs.
    pub fn error_category(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => "invalid_credentials",
            AuthError::Server { .. } => "server_error",
            AuthError::Network { is_timeout: true, .. } => "timeout",
            AuthError::Network { is_connection: true, .. } => "connection",
            AuthError::Network { .. } => "network",
            AuthError::Protocol { .. } => "data",
            AuthError::UrlParse { .. } => "url",
            AuthError::Storage(_) => "storage",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            AuthError::InvalidCredentials { status_code, .. } => Some(status_code.0),
            AuthError::Server { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}

impl From<url::ParseError> for AuthError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        AuthError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
