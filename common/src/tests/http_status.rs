use crate::HttpStatusCode;

/// **VALUE**: Verifies status classification used by error categories.
///
/// **BUG THIS CATCHES**: Would catch off-by-one range bounds (499/500/600).
#[test]
fn given_status_codes_when_classified_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(400).is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());
    assert!(HttpStatusCode(500).is_server_error());
    assert!(HttpStatusCode(599).is_server_error());
    assert!(!HttpStatusCode(600).is_server_error());
}

#[test]
fn given_401_and_403_when_checked_then_unauthorized_and_forbidden_are_distinct() {
    assert!(HttpStatusCode(401).is_unauthorized());
    assert!(!HttpStatusCode(401).is_forbidden());
    assert!(HttpStatusCode(403).is_forbidden());
    assert!(!HttpStatusCode(403).is_unauthorized());
    assert_eq!(HttpStatusCode::from(404).to_string(), "404");
}
