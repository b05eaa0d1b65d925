use crate::support::{TOKEN, config_dir, mount_me, output, start};

use camview::cli::{Command, DetectionCommand, RecordingsArgs, SearchArgs, UsersCommand};
use camview::commands;

use camview_core::auth::RoleLevel;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn recording(time: &str) -> serde_json::Value {
    json!({
        "camera_id": "cam1",
        "filename": format!("{time}.mp4"),
        "path": format!("cam1/2024-01-02/14/{time}.mp4"),
        "date": "2024-01-02",
        "hour": "14",
        "time": time,
        "size_mb": 1.5
    })
}

/// **VALUE**: Verifies recordings are paginated with the configured page size.
///
/// **WHY THIS MATTERS**: The page size is a user preference in `config.json`;
/// a hard-coded size would ignore it.
///
/// **BUG THIS CATCHES**: Would catch the command ignoring `ui.page_size` or
/// the footer miscounting pages.
#[tokio::test]
async fn given_three_recordings_and_page_size_two_when_listing_then_first_page_and_hint() {
    // GIVEN: An operator and three recordings
    let server = MockServer::start().await;
    mount_me(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/recordings"))
        .and(query_param("camera_id", "cam1"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recordings": [recording("10-00-00"), recording("10-05-00"), recording("10-10-00")]
        })))
        .mount(&server)
        .await;
    let dir = config_dir(&server, 2, Some(TOKEN));
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN
    let args = RecordingsArgs {
        camera: Some("cam1".to_string()),
        date: None,
        hour: None,
        dates: false,
        hours: false,
        page: 1,
    };
    commands::run(Command::Recordings(args), &mut ctx, dir.path(), &mut out)
        .await
        .expect("recordings should list");

    // THEN: Two rows and a footer pointing at page 2
    let text = output(out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3, "got {text}");
    assert!(lines[0].contains("10:00:00"), "got {text}");
    assert!(lines[0].contains("recordings/cam1/2024-01-02/14/10-00-00.mp4"), "got {text}");
    assert_eq!(lines[2], "Page 1/2 (3 total), next: --page 2");
}

/// **VALUE**: Verifies search sends the configured default confidence and groups
/// the hits per video.
///
/// **BUG THIS CATCHES**: Would catch the confidence parameter being dropped when
/// the flag is absent, which makes the backend fall back to its own threshold.
#[tokio::test]
async fn given_no_confidence_flag_when_searching_then_default_sent_and_grouped() {
    // GIVEN
    let server = MockServer::start().await;
    mount_me(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/api/clothing/search"))
        .and(query_param("color", "red"))
        .and(query_param("confidence", "0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"video_path": "cam1/2024-01-02/14/a.mp4", "confidence": 0.6},
                {"video_path": "cam2/2024-01-02/15/b.mp4", "confidence": 0.9},
                {"video_path": "cam2/2024-01-02/15/b.mp4", "confidence": 0.7}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN
    let args = SearchArgs {
        camera: None,
        clothing_type: None,
        color: Some("red".to_string()),
        confidence: None,
        options: false,
        page: 1,
    };
    commands::run(Command::Search(args), &mut ctx, dir.path(), &mut out)
        .await
        .expect("search should succeed");

    // THEN: The busier video first
    let text = output(out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "cam2/2024-01-02/15/b.mp4\t2 detections\tmax 90%");
    assert_eq!(lines[1], "cam1/2024-01-02/14/a.mp4\t1 detections\tmax 60%");
}

/// **VALUE**: Verifies `detection configure` keeps unset values from the backend.
///
/// **BUG THIS CATCHES**: Would catch unset flags being sent as zeros, which the
/// backend would accept and silently break detection.
#[tokio::test]
async fn given_only_interval_when_configuring_then_other_values_kept() {
    // GIVEN: An admin and current settings {enabled, 1.0s, 0.6}
    let server = MockServer::start().await;
    mount_me(&server, 3).await;
    Mock::given(method("GET"))
        .and(path("/api/clothing/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service": {"enabled": true, "detection_interval": 1.0, "min_confidence": 0.6},
            "database": {"total_detections": 4, "colors": {"red": 4}, "types": {"shirt": 4}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/clothing/config"))
        .and(body_json(
            json!({"enabled": true, "interval": 2.5, "min_confidence": 0.6}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN
    let command = Command::Detection(DetectionCommand::Configure {
        enabled: None,
        interval: Some(2.5),
        min_confidence: None,
    });
    commands::run(command, &mut ctx, dir.path(), &mut out)
        .await
        .expect("configure should succeed");

    // THEN
    assert_eq!(
        output(out),
        "Detection on, every 2.5s, min confidence 60%\n"
    );
}

#[tokio::test]
async fn given_admin_when_disabling_camera_detection_then_state_printed() {
    let server = MockServer::start().await;
    mount_me(&server, 3).await;
    Mock::given(method("POST"))
        .and(path("/camera/cam3/detection"))
        .and(body_json(json!({"enabled": false})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"detection_enabled": false})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    let command = Command::Detection(DetectionCommand::Disable {
        camera: "cam3".to_string(),
    });
    commands::run(command, &mut ctx, dir.path(), &mut out)
        .await
        .unwrap();

    assert_eq!(output(out), "cam3: detection off\n");
}

/// **VALUE**: Verifies `users add` posts the new user with the parsed role.
#[tokio::test]
async fn given_admin_when_adding_user_then_backend_receives_role_level() {
    // GIVEN
    let server = MockServer::start().await;
    mount_me(&server, 3).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/users"))
        .and(body_json(
            json!({"username": "bob", "password": "pw", "role": 2}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir(&server, 12, Some(TOKEN));
    let mut ctx = start(&dir).await;
    let mut out = Vec::new();

    // WHEN
    let command = Command::Users(UsersCommand::Add {
        username: "bob".to_string(),
        password: "pw".to_string(),
        role: RoleLevel::OPERATOR,
    });
    commands::run(command, &mut ctx, dir.path(), &mut out)
        .await
        .expect("add should succeed");

    // THEN
    assert_eq!(output(out), "Created bob\n");
}
