use crate::auth::{FileTokenStore, MemoryTokenStore, TokenStore};

use common::RedactedToken;

use tempfile::TempDir;

/// **VALUE**: Verifies the token survives a "restart" (a fresh store on the
/// same file).
///
/// **WHY THIS MATTERS**: Users stay signed in across launches only if the
/// token is really on disk.
#[test]
fn given_saved_token_when_new_store_loads_then_same_token() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token");
    FileTokenStore::new(&path)
        .save(&RedactedToken::new("T"))
        .unwrap();

    let loaded = FileTokenStore::new(&path).load().unwrap();

    assert_eq!(loaded.as_ref().map(RedactedToken::as_str), Some("T"));
}

#[test]
fn given_missing_or_blank_file_when_loaded_then_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token");
    let store = FileTokenStore::new(&path);

    assert!(store.load().unwrap().is_none());

    std::fs::write(&path, "  \n").unwrap();
    assert!(store.load().unwrap().is_none());
}

/// **VALUE**: Verifies clear is idempotent.
///
/// **BUG THIS CATCHES**: Would catch a logout failing with NotFound when the
/// token was already invalidated by a failed restore.
#[test]
fn given_cleared_store_when_cleared_again_then_ok() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("nested").join("token"));
    store.save(&RedactedToken::new("T")).unwrap();

    store.clear().unwrap();
    store.clear().unwrap();

    assert!(store.load().unwrap().is_none());
}

#[cfg(unix)]
#[test]
fn given_saved_token_when_inspected_then_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token");
    FileTokenStore::new(&path)
        .save(&RedactedToken::new("T"))
        .unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();

    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn given_memory_store_when_saved_and_cleared_then_tracks_token() {
    let store = MemoryTokenStore::new();
    assert!(store.load().unwrap().is_none());

    store.save(&RedactedToken::new("abc")).unwrap();
    assert_eq!(store.load().unwrap().unwrap().as_str(), "abc");

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}
