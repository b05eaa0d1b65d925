//! Shared fixtures for integration tests.

use camview_core::auth::{FileTokenStore, MemoryTokenStore, SessionManager, TokenStore};

use std::sync::Arc;
use std::time::Duration;

use url::Url;
use wiremock::MockServer;

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("mock server URI must parse")
}

/// A manager against `server` over `store`, not yet initialized.
pub fn manager(server: &MockServer, store: Arc<dyn TokenStore>) -> SessionManager {
    SessionManager::new(base_url(server), store, TIMEOUT).expect("client must build")
}

pub fn memory_store(token: Option<&str>) -> Arc<MemoryTokenStore> {
    Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    })
}

pub fn file_store(dir: &tempfile::TempDir) -> Arc<FileTokenStore> {
    Arc::new(FileTokenStore::new(dir.path().join("token")))
}
