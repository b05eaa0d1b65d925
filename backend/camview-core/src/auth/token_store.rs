//! Durable storage for the session token.
//!
//! A single token string under one fixed key. Only the session manager writes
//! it; [`AuthClient`](crate::auth::AuthClient) reads it on every request.

use crate::error::StorageError;

use common::{ErrorLocation, RedactedToken};

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<RedactedToken>, StorageError>;

    fn save(&self, token: &RedactedToken) -> Result<(), StorageError>;

    /// Remove the token. Removing an absent token succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Token persisted as a single file, surviving restarts.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<RedactedToken>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    location: ErrorLocation::from(Location::caller()),
                    source: e,
                });
            }
        };

        let token = contents.trim();
        if token.is_empty() {
            return Ok(None);
        }

        Ok(Some(RedactedToken::new(token)))
    }

    fn save(&self, token: &RedactedToken) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Write {
                path: parent.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            })?;
        }

        let temp_path = self.path.with_extension("tmp");

        std::fs::write(&temp_path, token.as_str()).map_err(|e| StorageError::Write {
            path: temp_path.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| StorageError::Write {
                    path: temp_path.clone(),
                    location: ErrorLocation::from(Location::caller()),
                    source: e,
                })?;
        }

        std::fs::rename(&temp_path, &self.path).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        debug!("Token stored at {} ({} chars)", self.path.display(), token.len());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Remove {
                path: self.path.clone(),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            }),
        }
    }
}

/// Process-local store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<RedactedToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Some(RedactedToken::new(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<RedactedToken>, StorageError> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, token: &RedactedToken) -> Result<(), StorageError> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}
