use crate::support::{TOKEN, config_dir, mount_me, output, start};

use camview::cli::Command;
use camview::commands;
use camview::error::CamviewError;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies `login` stores the token where the next run finds it.
///
/// **WHY THIS MATTERS**: Each `camview` invocation is a fresh process; without
/// the token file every command after `login` would be refused.
///
/// **BUG THIS CATCHES**: Would catch the CLI using a memory store, or writing the
/// token outside the configured directory.
#[tokio::test]
async fn given_valid_credentials_when_login_then_token_file_written() {
    // GIVEN: A backend accepting op1/secret and no stored session
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "op1", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "user": {"id": 2, "username": "op1", "role": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, None);
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN: Logging in
    let command = Command::Login {
        username: "op1".to_string(),
        password: "secret".to_string(),
    };
    commands::run(command, &mut ctx, dir.path(), &mut out)
        .await
        .expect("login should succeed");

    // THEN: Confirmation printed and token persisted
    assert_eq!(output(out), "Logged in as op1 (Operator (2))\n");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("token")).unwrap(),
        TOKEN
    );
}

/// **VALUE**: Verifies a refused login exits with the Authentication code and the
/// server's reason.
#[tokio::test]
async fn given_wrong_password_when_login_then_authentication_error() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, None);
    let mut ctx = start(&dir).await;

    // WHEN
    let command = Command::Login {
        username: "op1".to_string(),
        password: "nope".to_string(),
    };
    let err = commands::run(command, &mut ctx, dir.path(), &mut Vec::new())
        .await
        .unwrap_err();

    // THEN: No token written
    assert!(matches!(err, CamviewError::Authentication { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("Invalid credentials"));
    assert!(!dir.path().join("token").exists());
}

/// **VALUE**: Verifies a stored token is restored on startup and `whoami` lists
/// the tabs of the restored role.
///
/// **BUG THIS CATCHES**: Would catch the context skipping `init`, which leaves
/// every command stuck in the pending state.
#[tokio::test]
async fn given_stored_admin_token_when_whoami_then_all_tabs_listed() {
    // GIVEN: A stored token the backend resolves to an administrator
    let server = MockServer::start().await;
    mount_me(&server, 3).await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN
    commands::run(Command::Whoami, &mut ctx, dir.path(), &mut out)
        .await
        .expect("whoami should succeed");

    // THEN
    let text = output(out);
    assert!(text.contains("user9 (id 9)"), "got {text}");
    assert!(text.contains("Role: Administrator (3)"), "got {text}");
    assert!(
        text.contains("Tabs: Live, Recordings, Clothing search, Configuration, Users"),
        "got {text}"
    );
}

/// **VALUE**: Verifies `logout` removes the token file.
///
/// **BUG THIS CATCHES**: Would catch a logout that only drops the in-memory
/// session, signing the user back in on the next run.
#[tokio::test]
async fn given_restored_session_when_logout_then_token_file_removed() {
    // GIVEN
    let server = MockServer::start().await;
    mount_me(&server, 1).await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN
    commands::run(Command::Logout, &mut ctx, dir.path(), &mut out)
        .await
        .expect("logout should succeed");

    // THEN
    assert_eq!(output(out), "Logged out\n");
    assert!(!dir.path().join("token").exists());
    assert!(ctx.shell.current_session().is_none());
}
