//! The backend's bearer token.
//!
//! The raw value has exactly two legitimate destinations: the
//! `Authorization: Bearer` header of a backend request and the session token
//! file. Everything else (logs, `Session` debug output, `--json` error output)
//! only ever sees a placeholder.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// Shown instead of the token by `Display`.
const PLACEHOLDER: &str = "Bearer [REDACTED]";

/// Bearer token issued by `POST /auth/login`.
///
/// Wiped from memory on drop. Debug prints only the length so a log can still
/// tell an empty token from a real one.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// The raw token, for the `Authorization` header or the token file.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedToken")
            .field("len", &self.inner.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PLACEHOLDER)
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

/// Always fails: a token inside a serialized session or config would land on
/// disk or stdout unredacted.
impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Refused {
            type_name: "RedactedToken",
            hint: "write the token through TokenStore::save",
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
