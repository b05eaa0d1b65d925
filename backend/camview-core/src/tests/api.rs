use crate::api::{
    ClothingOptions, ClothingQuery, DEFAULT_PAGE_SIZE, DetectionConfig, Detection, NewUser,
    Recording, ServiceStats, TimelineMarker, UserUpdate, group_by_video, paginate,
};
use crate::auth::RoleLevel;
use crate::error::ApiError;

use serde_json::json;

fn detection(path: &str, confidence: f64) -> Detection {
    serde_json::from_value(json!({
        "video_path": path,
        "confidence": confidence,
        "clothing_type": "upper_clothing",
        "color": "red"
    }))
    .unwrap()
}

/// **VALUE**: Verifies search hits are grouped per video, counted, carry the
/// best confidence and come out most-hits first.
///
/// **BUG THIS CATCHES**: Would catch grouping by camera instead of by video,
/// a min instead of a max, or an unstable order for tied groups.
#[test]
fn given_detections_over_three_videos_when_grouped_then_sorted_by_count() {
    // GIVEN: Hits on three videos, the second one most often
    let a = "cam1/2023-12-10/14/a.mp4";
    let b = "cam2/2023-12-10/15/b.mp4";
    let c = "cam1/2023-12-11/09/c.mp4";
    let hits = vec![
        detection(a, 0.6),
        detection(b, 0.7),
        detection(b, 0.9),
        detection(c, 0.55),
        detection(b, 0.8),
    ];

    // WHEN: Grouping
    let groups = group_by_video(hits);

    // THEN: b first with three hits, then a and c in first-seen order
    let order: Vec<&str> = groups.iter().map(|g| g.path.as_str()).collect();
    assert_eq!(order, vec![b, a, c]);

    let top = &groups[0];
    assert_eq!(top.detections_count, 3);
    assert_eq!(top.detections.len(), 3);
    assert!((top.max_confidence - 0.9).abs() < f64::EPSILON);
    assert_eq!(top.camera_id, "cam2");
    assert_eq!(top.date, "2023-12-10");
    assert_eq!(top.hour, "15");
    assert_eq!(top.filename, "b.mp4");
    assert_eq!(top.detections[0].attributes["color"], "red");
}

#[test]
fn given_short_video_path_when_grouped_then_missing_parts_empty() {
    let groups = group_by_video(vec![detection("cam1", 0.5)]);

    assert_eq!(groups[0].camera_id, "cam1");
    assert_eq!(groups[0].filename, "");
}

/// **VALUE**: Verifies 1-based pagination at the edges.
#[test]
fn given_25_items_when_paginated_by_12_then_three_pages() {
    let items: Vec<u32> = (1..=25).collect();

    let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
    let last = paginate(&items, 3, DEFAULT_PAGE_SIZE);
    let beyond = paginate(&items, 4, DEFAULT_PAGE_SIZE);
    let zero = paginate(&items, 0, DEFAULT_PAGE_SIZE);

    assert_eq!(first.items, &items[..12]);
    assert_eq!(first.page_count, 3);
    assert!(first.has_next() && !first.has_previous());
    assert_eq!(last.items, &[25]);
    assert!(!last.has_next());
    assert!(beyond.items.is_empty());
    assert_eq!(zero.number, 1);
    assert_eq!(paginate::<u32>(&[], 1, 12).page_count, 0);
}

/// **VALUE**: Verifies recordings with missing or empty fields get display
/// defaults.
///
/// **BUG THIS CATCHES**: Would catch an empty filename rendering as a blank
/// row, or a missing size failing the whole list.
#[test]
fn given_sparse_recording_when_deserialized_then_defaults_filled() {
    let recording: Recording = serde_json::from_value(json!({
        "path": "cam1/2023-12-10/14/x.mp4",
        "filename": "",
        "time": "14-30-00"
    }))
    .unwrap();

    assert_eq!(recording.camera_id, "unknown");
    assert_eq!(recording.filename, "Sin nombre");
    assert_eq!(recording.date, "Sin fecha");
    assert_eq!(recording.hour, "00");
    assert_eq!(recording.size_bytes, 0);
    assert_eq!(recording.display_time(), "14:30:00");
    assert!(recording.is_playable());
}

#[test]
fn given_available_options_when_deserialized_then_types_listed_by_id() {
    let options: ClothingOptions = serde_json::from_value(json!({
        "clothing_types": {"upper_clothing": "Upper", "backpack": "Backpack"},
        "colors": ["red", "blue"]
    }))
    .unwrap();

    assert_eq!(options.clothing_types[0].id, "backpack");
    assert_eq!(options.clothing_types[1].name, "Upper");
    assert_eq!(options.colors, vec!["red", "blue"]);
}

#[test]
fn given_query_defaults_when_validated_then_half_confidence_accepted() {
    let query = ClothingQuery::default();
    assert!((query.confidence - 0.5).abs() < f64::EPSILON);
    assert!(query.validate().is_ok());

    let bad = ClothingQuery {
        confidence: 1.2,
        ..ClothingQuery::default()
    };
    assert!(matches!(bad.validate(), Err(ApiError::Validation { .. })));
}

#[test]
fn given_timeline_marker_when_displayed_then_minutes_seconds_and_primary_type() {
    let marker: TimelineMarker = serde_json::from_value(json!({
        "time": 125.4,
        "summary": [{"type": "backpack", "color": "black", "count": 2}]
    }))
    .unwrap();

    assert_eq!(marker.display_time(), "02:05");
    assert_eq!(marker.primary_type(), "backpack");
}

#[test]
fn given_stats_when_top_colors_then_most_frequent_first() {
    let stats: ServiceStats = serde_json::from_value(json!({
        "service": {"enabled": true, "detection_interval": 1.5, "min_confidence": 0.4},
        "database": {
            "total_detections": 42,
            "colors": {"red": 3, "blue": 10, "green": 7},
            "types": {}
        }
    }))
    .unwrap();

    assert_eq!(stats.database.top_colors(2), vec![("blue", 10), ("green", 7)]);
    assert!(stats.database.top_types(5).is_empty());
    assert!(stats.config().validate().is_ok());
}

/// **VALUE**: Verifies detection settings stay in the service's ranges.
#[test]
fn given_detection_config_out_of_range_when_validated_then_rejected() {
    let too_fast = DetectionConfig {
        enabled: true,
        interval: 0.1,
        min_confidence: 0.5,
    };
    let too_strict = DetectionConfig {
        enabled: true,
        interval: 1.0,
        min_confidence: 0.95,
    };

    assert!(matches!(too_fast.validate(), Err(ApiError::Validation { .. })));
    assert!(matches!(too_strict.validate(), Err(ApiError::Validation { .. })));
}

/// **VALUE**: Verifies the user form rules: username always, password only
/// on create, blank password omitted on update.
///
/// **BUG THIS CATCHES**: Would catch an update sending `"password": ""` and
/// resetting the user's password to empty.
#[test]
fn given_user_forms_when_validated_then_rules_applied() {
    assert!(NewUser::new("bob", "pw", RoleLevel::VIEWER).validate().is_ok());
    assert!(NewUser::new("  ", "pw", RoleLevel::VIEWER).validate().is_err());
    assert!(NewUser::new("bob", " ", RoleLevel::VIEWER).validate().is_err());

    let update = UserUpdate::new("bob", RoleLevel::OPERATOR).with_password("  ");
    assert!(update.validate().is_ok());
    let body = serde_json::to_value(&update).unwrap();
    assert_eq!(body, json!({"username": "bob", "role": 2}));

    let with_password = UserUpdate::new("bob", RoleLevel::ADMIN).with_password("new");
    assert_eq!(serde_json::to_value(&with_password).unwrap()["password"], "new");
}
