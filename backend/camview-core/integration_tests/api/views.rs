use crate::support::{manager, memory_store};

use camview_core::api::{
    CamviewApi, ClothingQuery, DetectionConfig, NewUser, RecordingFilter, UserUpdate,
};
use camview_core::auth::RoleLevel;
use camview_core::error::ApiError;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn api(server: &MockServer) -> CamviewApi {
    CamviewApi::new(manager(server, memory_store(Some("T"))).auth_client())
}

#[tokio::test]
async fn given_camera_list_when_fetched_then_cameras_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cameras"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "cam1", "name": "Entrance"},
            {"id": "cam2"}
        ])))
        .mount(&server)
        .await;

    let cameras = api(&server).await.list_cameras().await.unwrap();

    assert_eq!(cameras.len(), 2);
    assert_eq!(cameras[0].display_name(), "Entrance");
    assert_eq!(cameras[1].display_name(), "cam2");
}

/// **VALUE**: Verifies recording filters reach the backend as query
/// parameters and the rows come back normalized.
///
/// **BUG THIS CATCHES**: Would catch empty filters being sent as `camera_id=`
/// (which the backend reads as "camera with empty id").
#[tokio::test]
async fn given_filter_when_listing_recordings_then_params_sent_and_rows_normalized() {
    // GIVEN: A backend expecting camera and date, but no hour
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recordings"))
        .and(query_param("camera_id", "cam1"))
        .and(query_param("date", "2023-12-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recordings": [{"path": "cam1/2023-12-10/14/a.mp4", "size_mb": 12.5}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Listing with an empty hour filter
    let filter = RecordingFilter::default()
        .camera("cam1")
        .date("2023-12-10")
        .hour("");
    let recordings = api(&server).await.list_recordings(&filter).await.unwrap();

    // THEN: One normalized row
    assert_eq!(recordings.len(), 1);
    assert_eq!(recordings[0].camera_id, "unknown");
    assert_eq!(recordings[0].filename, "Sin nombre");
    assert!((recordings[0].size_mb - 12.5).abs() < f64::EPSILON);
    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or_default().contains("hour"));
}

#[tokio::test]
async fn given_dates_and_hours_when_listed_then_values_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recordings/dates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"dates": ["2023-12-10"]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recordings/hours"))
        .and(query_param("date", "2023-12-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hours": ["14", "15"]})))
        .mount(&server)
        .await;
    let api = api(&server).await;

    let dates = api.list_recording_dates(None).await.unwrap();
    let hours = api.list_recording_hours(Some("cam1"), "2023-12-10").await.unwrap();

    assert_eq!(dates, vec!["2023-12-10"]);
    assert_eq!(hours, vec!["14", "15"]);
    assert!(matches!(
        api.list_recording_hours(None, "").await,
        Err(ApiError::Validation { .. })
    ));
}

#[tokio::test]
async fn given_recording_when_playback_url_then_under_recordings_root() {
    let server = MockServer::start().await;
    let api = api(&server).await;
    let recording = serde_json::from_value(json!({
        "path": "cam1/2023-12-10/14/Entrada Principal.mp4"
    }))
    .unwrap();

    let url = api.playback_url(&recording).unwrap();

    assert_eq!(
        url.path(),
        "/recordings/cam1/2023-12-10/14/Entrada%20Principal.mp4"
    );
}

/// **VALUE**: Verifies the clothing search sends the confidence threshold and
/// groups the hits by video.
#[tokio::test]
async fn given_search_query_when_searching_then_confidence_sent_and_grouped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clothing/search"))
        .and(query_param("color", "red"))
        .and(query_param("confidence", "0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"video_path": "cam1/d/14/a.mp4", "confidence": 0.6},
                {"video_path": "cam2/d/15/b.mp4", "confidence": 0.9},
                {"video_path": "cam2/d/15/b.mp4", "confidence": 0.7}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ClothingQuery {
        color: Some("red".to_string()),
        ..ClothingQuery::default()
    };
    let groups = api(&server).await.search_clothing_by_video(&query).await.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].path, "cam2/d/15/b.mp4");
    assert_eq!(groups[0].detections_count, 2);
}

/// **VALUE**: Verifies the video path travels as a single encoded segment.
///
/// **BUG THIS CATCHES**: Would catch the path being joined raw, which turns
/// `cam1/d/14/a.mp4` into four route segments and a 404.
#[tokio::test]
async fn given_video_path_when_timeline_then_path_encoded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clothing/video/cam1%2Fd%2F14%2Fa.mp4/timeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timeline": [{"time": 30, "summary": [{"type": "tie", "color": "blue", "count": 1}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let timeline = api(&server)
        .await
        .video_timeline("cam1/d/14/a.mp4")
        .await
        .unwrap();

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].primary_type(), "tie");
}

#[tokio::test]
async fn given_detection_settings_when_managed_then_endpoints_called() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clothing/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service": {"enabled": true, "detection_interval": 2.0, "min_confidence": 0.5},
            "database": {"total_detections": 10, "colors": {"red": 4}, "types": {"tie": 1}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/clothing/config"))
        .and(body_json(json!({"enabled": false, "interval": 2.0, "min_confidence": 0.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/camera/cam1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "detection": {"enabled": true},
            "fps": 15
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/camera/cam1/detection"))
        .and(body_json(json!({"enabled": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detection_enabled": false})))
        .expect(1)
        .mount(&server)
        .await;
    let api = api(&server).await;

    let stats = api.service_stats().await.unwrap();
    let config = DetectionConfig {
        enabled: false,
        ..stats.config()
    };
    api.update_detection_config(&config).await.unwrap();
    let status = api.camera_status("cam1").await.unwrap();
    let enabled = api.set_camera_detection("cam1", false).await.unwrap();

    assert_eq!(stats.database.total_detections, 10);
    assert!(status.detection.enabled);
    assert_eq!(status.other["fps"], 15);
    assert!(!enabled);
}

/// **VALUE**: Verifies the user CRUD endpoints and that validation failures
/// never reach the backend.
#[tokio::test]
async fn given_user_admin_when_crud_then_requests_match_backend_routes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "admin", "role": 3}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/users"))
        .and(body_json(json!({"username": "bob", "password": "pw", "role": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/users/5"))
        .and(body_json(json!({"username": "bob", "role": 2})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/users/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let api = api(&server).await;

    let users = api.list_users().await.unwrap();
    api.create_user(&NewUser::new("bob", "pw", RoleLevel::VIEWER))
        .await
        .unwrap();
    api.update_user(5, &UserUpdate::new("bob", RoleLevel::OPERATOR))
        .await
        .unwrap();
    api.delete_user(5).await.unwrap();
    let invalid = api.create_user(&NewUser::new("", "pw", RoleLevel::VIEWER)).await;

    assert_eq!(users[0].role, RoleLevel::ADMIN);
    assert!(matches!(invalid, Err(ApiError::Validation { .. })));
}

#[tokio::test]
async fn given_backend_rejects_user_when_created_then_status_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/users"))
        .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"message":"exists"}"#))
        .mount(&server)
        .await;

    let error = api(&server)
        .await
        .create_user(&NewUser::new("bob", "pw", RoleLevel::VIEWER))
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(409));
    assert_eq!(error.error_category(), "client_error");
    assert!(error.to_string().contains("exists"));
}
