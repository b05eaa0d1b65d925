use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Transport-level failures of a live frame channel.
#[derive(Debug, ThisError)]
pub enum ChannelError {
    #[error("Connect Error: camera '{camera_id}': {message} {location}")]
    Connect {
        camera_id: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Send Error: camera '{camera_id}': {message} {location}")]
    Send {
        camera_id: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Stream URL Error: {message} {location}")]
    Url {
        message: String,
        location: ErrorLocation,
    },
}

impl ChannelError {
    #[track_caller]
    pub fn connect(camera_id: impl Into<String>, message: impl Into<String>) -> Self {
        ChannelError::Connect {
            camera_id: camera_id.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn send(camera_id: impl Into<String>, message: impl Into<String>) -> Self {
        ChannelError::Send {
            camera_id: camera_id.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn url(message: impl Into<String>) -> Self {
        ChannelError::Url {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for ChannelError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ChannelError::url(error.to_string())
    }
}

/// A server frame message that could not be turned into a frame.
///
/// Never changes channel state: the message is logged and dropped.
#[derive(Debug, ThisError)]
pub enum FrameError {
    #[error("Frame Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Frame Empty Error: message carries neither an image nor an error {location}")]
    Empty { location: ErrorLocation },

    #[error("Frame Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for FrameError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        FrameError::Parse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<base64::DecodeError> for FrameError {
    #[track_caller]
    fn from(error: base64::DecodeError) -> Self {
        FrameError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
