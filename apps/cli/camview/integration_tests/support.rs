//! Shared fixtures: a config dir pointing at a wiremock backend.

use camview::context::{AppContext, resolve_paths};

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "T";

/// A config directory whose `config.json` targets `server`, with the given
/// page size and optionally a stored token.
pub fn config_dir(server: &MockServer, page_size: usize, token: Option<&str>) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let config = json!({
        "version": 1,
        "server": { "base_url": format!("{}/", server.uri()) },
        "ui": { "page_size": page_size }
    });
    std::fs::write(dir.path().join("config.json"), config.to_string()).expect("write config");
    if let Some(token) = token {
        std::fs::write(dir.path().join("token"), token).expect("write token");
    }
    dir
}

/// `GET api/auth/me` answering for [`TOKEN`] with a user of `role`.
pub async fn mount_me(server: &MockServer, role: u8) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "username": "user9", "role": role
        })))
        .mount(server)
        .await;
}

pub async fn start(dir: &TempDir) -> AppContext {
    let paths = resolve_paths(Some(dir.path())).expect("paths");
    AppContext::start(paths).await.expect("context must start")
}

pub fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("utf-8 output")
}
