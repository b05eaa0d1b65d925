use crate::support::{TOKEN, config_dir, mount_me, start};

use camview::cli::{Command, RecordingsArgs, UsersCommand};
use camview::commands;
use camview::error::CamviewError;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn recordings_args() -> RecordingsArgs {
    RecordingsArgs {
        camera: None,
        date: None,
        hour: None,
        dates: false,
        hours: false,
        page: 1,
    }
}

/// **VALUE**: Verifies a viewer is refused the Recordings tab before any request.
///
/// **WHY THIS MATTERS**: Role gating has to match the browser shell; a viewer
/// must not list recordings just by switching to the terminal.
///
/// **BUG THIS CATCHES**: Would catch a command that calls the backend first and
/// relies on the server to refuse.
#[tokio::test]
async fn given_viewer_when_listing_recordings_then_unauthorized_without_request() {
    // GIVEN: A restored viewer session and a recordings endpoint that must not be hit
    let server = MockServer::start().await;
    mount_me(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/recordings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;

    // WHEN
    let err = commands::run(
        Command::Recordings(recordings_args()),
        &mut ctx,
        dir.path(),
        &mut Vec::new(),
    )
    .await
    .unwrap_err();

    // THEN
    assert!(matches!(err, CamviewError::Unauthorized { .. }));
    assert_eq!(err.exit_code(), 4);
}

/// **VALUE**: Verifies an operator can search but not administer users.
///
/// **BUG THIS CATCHES**: Would catch the Users tab being gated at operator level.
#[tokio::test]
async fn given_operator_when_listing_users_then_unauthorized() {
    // GIVEN
    let server = MockServer::start().await;
    mount_me(&server, 2).await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;

    // WHEN
    let err = commands::run(
        Command::Users(UsersCommand::List),
        &mut ctx,
        dir.path(),
        &mut Vec::new(),
    )
    .await
    .unwrap_err();

    // THEN
    assert!(matches!(err, CamviewError::Unauthorized { .. }));
}

/// **VALUE**: Verifies that without a session no command reaches the backend.
///
/// **WHY THIS MATTERS**: A missing token must never produce an anonymous
/// request; the user is told to log in instead.
///
/// **BUG THIS CATCHES**: Would catch `cameras` skipping the guard and sending a
/// request without a bearer header.
#[tokio::test]
async fn given_no_session_when_listing_cameras_then_authentication_error_without_request() {
    // GIVEN: No stored token
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cameras"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, None);
    let mut ctx = start(&dir).await;

    // WHEN
    let err = commands::run(Command::Cameras, &mut ctx, dir.path(), &mut Vec::new())
        .await
        .unwrap_err();

    // THEN
    assert!(matches!(err, CamviewError::Authentication { .. }));
    assert_eq!(err.exit_code(), 3);
}

/// **VALUE**: Verifies a stored token the backend rejects is dropped at startup.
///
/// **BUG THIS CATCHES**: Would catch a stale token surviving on disk and being
/// sent again by every later command.
#[tokio::test]
async fn given_rejected_token_when_starting_then_token_cleared_and_whoami_fails() {
    // GIVEN: A backend rejecting the stored token
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, Some(TOKEN));

    // WHEN
    let mut ctx = start(&dir).await;
    let result = commands::run(Command::Whoami, &mut ctx, dir.path(), &mut Vec::new()).await;

    // THEN
    assert!(!dir.path().join("token").exists());
    assert!(matches!(result, Err(CamviewError::Authentication { .. })));
}
