use super::scripted::{ScriptedConnector, eventually};
use crate::api::Camera;
use crate::auth::{MemoryTokenStore, RoleLevel, Session, SessionManager, User};
use crate::error::ShellError;
use crate::guard::{GuardDecision, Route};
use crate::shell::{Tab, ViewShell, grid_spans};

use common::RedactedToken;

use std::sync::Arc;

fn session(role: RoleLevel) -> Session {
    Session::new(
        User {
            id: 7,
            username: "op1".to_string(),
            role,
        },
        RedactedToken::new("T"),
    )
}

fn shell_for(role: Option<RoleLevel>) -> (ViewShell<ScriptedConnector>, Arc<ScriptedConnector>) {
    let store = match role {
        Some(_) => MemoryTokenStore::with_token("T"),
        None => MemoryTokenStore::new(),
    };
    let manager = SessionManager::with_session(Arc::new(store), role.map(session));
    let connector = Arc::new(ScriptedConnector::default());
    (ViewShell::new(manager, Arc::clone(&connector), 4), connector)
}

fn cameras(n: usize) -> Vec<Camera> {
    (1..=n)
        .map(|i| Camera::new(format!("cam{i}"), format!("Camera {i}")))
        .collect()
}

/// **VALUE**: Verifies the 4-camera cap: a 5th add is rejected and opens no
/// connection.
///
/// **WHY THIS MATTERS**: Each live tile holds a socket and a decode loop; the
/// backend sizes its streaming workers for four viewers per client.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one in the limit check or a
/// channel opened before the check runs.
#[tokio::test]
async fn given_four_cameras_viewed_when_fifth_added_then_rejected_without_channel() {
    // GIVEN: Five cameras, four of them on screen
    let (mut shell, connector) = shell_for(Some(RoleLevel::VIEWER));
    shell.set_cameras(cameras(5)).await.unwrap();
    for id in ["cam2", "cam3", "cam4"] {
        shell.add_camera(id).unwrap();
    }
    assert_eq!(shell.channels().len(), 4);
    assert!(eventually(|| connector.connect_count() == 4).await);

    // WHEN: Adding the fifth
    let result = shell.add_camera("cam5");

    // THEN: Rejected with the limit, and no fifth connection attempt
    assert!(matches!(result, Err(ShellError::CameraLimit { max: 4, .. })));
    assert_eq!(shell.channels().len(), 4);
    tokio::task::yield_now().await;
    assert_eq!(connector.connect_count(), 4);
    assert!(!shell.can_add_camera());
}

/// **VALUE**: Verifies the camera list auto-selects the first camera and the
/// selection list excludes viewed cameras.
#[tokio::test]
async fn given_camera_list_when_loaded_then_first_camera_viewed() {
    let (mut shell, _) = shell_for(Some(RoleLevel::VIEWER));

    shell.set_cameras(cameras(3)).await.unwrap();

    assert!(shell.is_viewing("cam1"));
    let available: Vec<&str> = shell.available_cameras().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(available, vec!["cam2", "cam3"]);
    assert_eq!(shell.layout(), vec![12]);
}

/// **VALUE**: Verifies a refreshed list closes channels of removed cameras.
///
/// **BUG THIS CATCHES**: Would catch channels to deleted cameras lingering
/// and retrying against a stream that no longer exists.
#[tokio::test]
async fn given_viewed_camera_removed_from_list_when_refreshed_then_channel_closed() {
    let (mut shell, _) = shell_for(Some(RoleLevel::VIEWER));
    shell.set_cameras(cameras(3)).await.unwrap();
    shell.add_camera("cam2").unwrap();

    shell.set_cameras(vec![Camera::new("cam2", "Camera 2")]).await.unwrap();

    assert!(!shell.is_viewing("cam1"));
    assert!(shell.is_viewing("cam2"));
    assert_eq!(shell.channels().len(), 1);
}

#[tokio::test]
async fn given_viewed_camera_when_added_again_then_already_viewing() {
    let (mut shell, _) = shell_for(Some(RoleLevel::VIEWER));
    shell.set_cameras(cameras(2)).await.unwrap();

    let result = shell.add_camera("cam1");

    assert!(matches!(result, Err(ShellError::AlreadyViewing { .. })));
}

#[tokio::test]
async fn given_unknown_camera_when_added_then_unknown_camera() {
    let (mut shell, _) = shell_for(Some(RoleLevel::VIEWER));
    shell.set_cameras(cameras(1)).await.unwrap();

    let result = shell.add_camera("cam9");

    assert!(matches!(result, Err(ShellError::UnknownCamera { .. })));
}

#[tokio::test]
async fn given_viewed_camera_when_removed_then_available_again() {
    let (mut shell, _) = shell_for(Some(RoleLevel::VIEWER));
    shell.set_cameras(cameras(2)).await.unwrap();

    assert!(shell.remove_camera("cam1").await);
    assert!(!shell.remove_camera("cam1").await);

    assert_eq!(shell.available_cameras().len(), 2);
    assert!(shell.layout().is_empty());
}

/// **VALUE**: Verifies tabs follow the role ladder.
///
/// **BUG THIS CATCHES**: Would catch an admin-only tab leaking to operators or
/// an exact-match role check hiding operator tabs from admins.
#[test]
fn given_each_role_when_listing_tabs_then_only_permitted_tabs() {
    let (viewer, _) = shell_for(Some(RoleLevel::VIEWER));
    let (operator, _) = shell_for(Some(RoleLevel::OPERATOR));
    let (admin, _) = shell_for(Some(RoleLevel::ADMIN));
    let (anonymous, _) = shell_for(None);

    assert_eq!(viewer.visible_tabs(), vec![Tab::Live]);
    assert_eq!(
        operator.visible_tabs(),
        vec![Tab::Live, Tab::Recordings, Tab::ClothingSearch]
    );
    assert_eq!(admin.visible_tabs(), Tab::ALL.to_vec());
    assert!(anonymous.visible_tabs().is_empty());
}

/// **VALUE**: Verifies opening a forbidden tab redirects and keeps the
/// current tab.
#[test]
fn given_viewer_when_opening_users_tab_then_redirect_unauthorized() {
    let (mut shell, _) = shell_for(Some(RoleLevel::VIEWER));

    let decision = shell.open_tab(Tab::Users);

    assert_eq!(decision, GuardDecision::Redirect(Route::Unauthorized));
    assert_eq!(shell.active_tab(), Tab::Live);
    assert!(matches!(
        shell.require(Tab::Users),
        Err(ShellError::Unauthorized { tab: Tab::Users, .. })
    ));
}

#[test]
fn given_operator_when_opening_recordings_then_active() {
    let (mut shell, _) = shell_for(Some(RoleLevel::OPERATOR));

    assert_eq!(shell.open_tab(Tab::Recordings), GuardDecision::Allow);
    assert_eq!(shell.active_tab(), Tab::Recordings);
}

/// **VALUE**: Verifies logout tears down every channel and the token.
///
/// **BUG THIS CATCHES**: Would catch live sockets surviving a logout and
/// streaming to a signed-out screen.
#[tokio::test]
async fn given_live_grid_when_logged_out_then_channels_closed_and_login_required() {
    let (mut shell, _) = shell_for(Some(RoleLevel::ADMIN));
    shell.set_cameras(cameras(2)).await.unwrap();
    shell.add_camera("cam2").unwrap();
    shell.open_tab(Tab::Users);

    shell.logout().await.unwrap();

    assert!(shell.channels().is_empty());
    assert_eq!(shell.active_tab(), Tab::Live);
    assert_eq!(shell.session().guard(None), GuardDecision::Redirect(Route::Login));
    assert!(matches!(shell.api(), Err(ShellError::NotAuthenticated { .. })));
}

#[tokio::test]
async fn given_no_session_when_adding_camera_then_not_authenticated() {
    let (mut shell, connector) = shell_for(None);

    let result = shell.set_cameras(cameras(1)).await;

    assert!(matches!(result, Err(ShellError::NotAuthenticated { .. })));
    assert_eq!(connector.connect_count(), 0);
}

#[test]
fn given_camera_counts_when_laying_out_then_spans_match_grid() {
    assert!(grid_spans(0).is_empty());
    assert_eq!(grid_spans(1), vec![12]);
    assert_eq!(grid_spans(2), vec![6, 6]);
    assert_eq!(grid_spans(3), vec![12, 6, 6]);
    assert_eq!(grid_spans(4), vec![6, 6, 6, 6]);
}
