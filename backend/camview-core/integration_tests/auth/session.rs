use crate::support::{file_store, manager, memory_store};

use camview_core::auth::{RoleLevel, TokenStore};
use camview_core::error::AuthError;
use camview_core::guard::{GuardDecision, Route};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "op1", "password": "correct"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "user": {"id": 2, "username": "op1", "role": 2}
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies a successful login populates the session and persists
/// the token.
///
/// **WHY THIS MATTERS**: Every protected call reads the token from the store;
/// a session without a stored token would fail every request after login.
///
/// **BUG THIS CATCHES**: Would catch the token being kept only in memory, or
/// the user fields being mapped from the wrong JSON keys.
#[tokio::test]
async fn given_valid_credentials_when_login_then_session_and_token_stored() {
    // GIVEN: A backend accepting op1/correct
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    let dir = tempfile::TempDir::new().unwrap();
    let store = file_store(&dir);
    let mut sessions = manager(&server, store.clone());
    sessions.init().await;

    // WHEN: Logging in
    let session = sessions.login("op1", "correct").await.unwrap();

    // THEN: Session {2, op1, 2, T} and the token on disk
    assert_eq!(session.user_id, 2);
    assert_eq!(session.username, "op1");
    assert_eq!(session.role, RoleLevel::OPERATOR);
    assert_eq!(session.token.as_str(), "T");
    assert_eq!(store.load().unwrap().unwrap().as_str(), "T");
    assert_eq!(std::fs::read_to_string(dir.path().join("token")).unwrap(), "T");
    assert!(sessions.has_role(RoleLevel::OPERATOR));
    assert!(!sessions.has_role(RoleLevel::ADMIN));
}

/// **VALUE**: Verifies logout clears the store and the session, and the guard
/// then sends the user to login.
///
/// **BUG THIS CATCHES**: Would catch a logout that clears memory but leaves
/// the token on disk, silently signing the user back in on the next start.
#[tokio::test]
async fn given_logged_in_when_logout_then_store_empty_and_guard_redirects_to_login() {
    // GIVEN: A logged-in session
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    let store = memory_store(None);
    let mut sessions = manager(&server, store.clone());
    sessions.init().await;
    sessions.login("op1", "correct").await.unwrap();

    // WHEN: Logging out (twice, it is idempotent)
    sessions.logout().unwrap();
    sessions.logout().unwrap();

    // THEN: Nothing stored, no session, guard redirects to login
    assert!(store.load().unwrap().is_none());
    assert!(sessions.session().is_none());
    assert_eq!(sessions.guard(None), GuardDecision::Redirect(Route::Login));
}

/// **VALUE**: Verifies a 401 becomes `InvalidCredentials` carrying the
/// backend's `detail` text.
#[tokio::test]
async fn given_wrong_password_when_login_then_invalid_credentials_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect password"})),
        )
        .mount(&server)
        .await;
    let store = memory_store(None);
    let mut sessions = manager(&server, store.clone());

    let error = sessions.login("op1", "wrong").await.unwrap_err();

    assert!(error.is_invalid_credentials());
    assert_eq!(error.user_message(), "Incorrect password");
    assert_eq!(error.status_code(), Some(401));
    assert!(store.load().unwrap().is_none());
    assert!(sessions.session().is_none());
}

#[tokio::test]
async fn given_backend_failure_when_login_then_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let mut sessions = manager(&server, memory_store(None));

    let error = sessions.login("op1", "correct").await.unwrap_err();

    assert!(matches!(error, AuthError::Server { .. }));
    assert_eq!(error.error_category(), "server_error");
}

#[tokio::test]
async fn given_empty_access_token_when_login_then_protocol_error_and_nothing_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "",
            "user": {"id": 2, "username": "op1", "role": 2}
        })))
        .mount(&server)
        .await;
    let store = memory_store(None);
    let mut sessions = manager(&server, store.clone());

    let error = sessions.login("op1", "correct").await.unwrap_err();

    assert!(matches!(error, AuthError::Protocol { .. }));
    assert!(store.load().unwrap().is_none());
}

/// **VALUE**: Verifies a persisted token is validated against `api/auth/me`
/// and restores the session.
#[tokio::test]
async fn given_valid_persisted_token_when_init_then_session_restored() {
    // GIVEN: A stored token the backend accepts
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer T"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "username": "admin", "role": 3})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut sessions = manager(&server, memory_store(Some("T")));
    assert!(sessions.is_loading());
    assert_eq!(sessions.guard(None), GuardDecision::Pending);

    // WHEN: Initializing
    sessions.init().await;

    // THEN: Admin session, loading done
    assert!(!sessions.is_loading());
    let session = sessions.session().expect("session restored");
    assert_eq!(session.username, "admin");
    assert!(sessions.has_exact_role(RoleLevel::ADMIN));
    assert_eq!(sessions.guard(Some(RoleLevel::ADMIN)), GuardDecision::Allow);
}

/// **VALUE**: Verifies a rejected token is removed from storage.
///
/// **BUG THIS CATCHES**: Would catch a stale token surviving and being sent
/// with every request until the user logs out manually.
#[tokio::test]
async fn given_rejected_persisted_token_when_init_then_token_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let store = memory_store(Some("expired"));
    let mut sessions = manager(&server, store.clone());

    sessions.init().await;

    assert!(sessions.session().is_none());
    assert!(!sessions.is_loading());
    assert!(store.load().unwrap().is_none());
}

/// **VALUE**: Verifies an unreachable backend during restore also clears the
/// token and ends loading.
#[tokio::test]
async fn given_unreachable_backend_when_init_then_token_cleared_and_not_loading() {
    // GIVEN: A server that is gone
    let server = MockServer::start().await;
    let store = memory_store(Some("T"));
    let mut sessions = manager(&server, store.clone());
    drop(server);

    // WHEN: Initializing
    sessions.init().await;

    // THEN: No session, no token, no longer loading
    assert!(sessions.session().is_none());
    assert!(store.load().unwrap().is_none());
    assert_eq!(sessions.guard(None), GuardDecision::Redirect(Route::Login));
}

#[tokio::test]
async fn given_no_persisted_token_when_init_then_no_request_and_not_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mut sessions = manager(&server, memory_store(None));

    sessions.init().await;

    assert!(!sessions.is_loading());
    assert!(!sessions.is_authenticated());
}
