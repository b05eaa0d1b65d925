use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a secret reaches a serializer.
///
/// Secrets are written by their owner (the token file, the `Authorization`
/// header) and never as part of a larger serialized value.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Refused to serialize {type_name}: {hint} {location}")]
    Refused {
        type_name: &'static str,
        hint: &'static str,
        location: ErrorLocation,
    },
}
