//! Strict decoding of server frame messages.
//!
//! Messages are JSON objects with a closed set of fields. Anything else is a
//! [`FrameError`]; the payload is never interpreted beyond that.

use crate::error::FrameError;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFrameMessage {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    image: Option<String>,
    /// Abbreviated form of `image` sent by newer servers.
    #[serde(default)]
    i: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameMessage {
    /// The server reported a failure for this stream.
    Error(String),
    /// Decoded JPEG bytes.
    Image(Vec<u8>),
}

/// Parse one text message from the stream.
///
/// `error` wins over an image when both are present. `i` wins over `image`.
/// Empty strings count as absent, and so do `null`, `false` and `0` in
/// `error`.
pub fn parse_frame_message(text: &str) -> Result<FrameMessage, FrameError> {
    let raw: RawFrameMessage = serde_json::from_str(text)?;

    if let Some(error) = raw.error.as_ref().and_then(error_text) {
        return Ok(FrameMessage::Error(error));
    }

    let payload = raw
        .i
        .filter(|s| !s.is_empty())
        .or(raw.image.filter(|s| !s.is_empty()));

    let Some(payload) = payload else {
        return Err(FrameError::Empty {
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let bytes = BASE64.decode(payload.trim())?;
    Ok(FrameMessage::Image(bytes))
}

fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The latest frame of a camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Arc<[u8]>,
    sequence: u64,
}

impl Frame {
    pub fn new(bytes: Vec<u8>, sequence: u64) -> Self {
        Self {
            bytes: bytes.into(),
            sequence,
        }
    }

    /// JPEG bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 1-based position of this frame over the channel's lifetime, so it
    /// keeps increasing across reconnects.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// `data:image/jpeg;base64,...` for embedding in an `<img>` tag.
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(&self.bytes))
    }
}
