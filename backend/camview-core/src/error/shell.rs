use crate::shell::Tab;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ShellError {
    #[error("Camera Limit Error: already viewing {max} cameras {location}")]
    CameraLimit { max: usize, location: ErrorLocation },

    #[error("Unknown Camera Error: '{camera_id}' {location}")]
    UnknownCamera {
        camera_id: String,
        location: ErrorLocation,
    },

    #[error("Already Viewing Error: '{camera_id}' {location}")]
    AlreadyViewing {
        camera_id: String,
        location: ErrorLocation,
    },

    #[error("Not Authenticated Error {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("Unauthorized Error: role too low for {tab:?} {location}")]
    Unauthorized { tab: Tab, location: ErrorLocation },
}

impl ShellError {
    #[track_caller]
    pub fn camera_limit(max: usize) -> Self {
        ShellError::CameraLimit {
            max,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown_camera(camera_id: impl Into<String>) -> Self {
        ShellError::UnknownCamera {
            camera_id: camera_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_viewing(camera_id: impl Into<String>) -> Self {
        ShellError::AlreadyViewing {
            camera_id: camera_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_authenticated() -> Self {
        ShellError::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(tab: Tab) -> Self {
        ShellError::Unauthorized {
            tab,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
