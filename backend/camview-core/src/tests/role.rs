use crate::auth::{MemoryTokenStore, RoleLevel, Session, SessionManager, User};

use common::RedactedToken;

use std::sync::Arc;

fn manager_with_role(role: u8) -> SessionManager {
    let session = Session::new(
        User {
            id: 1,
            username: "u".to_string(),
            role: RoleLevel(role),
        },
        RedactedToken::new("T"),
    );
    SessionManager::with_session(Arc::new(MemoryTokenStore::with_token("T")), Some(session))
}

/// **VALUE**: Verifies `has_role` is a `>=` comparison for every pair of
/// levels, including levels the client has no name for.
///
/// **WHY THIS MATTERS**: Admin screens are only hidden, never server-enforced
/// by the client; an admin that loses operator tabs cannot do their job.
///
/// **BUG THIS CATCHES**: Would catch `==` sneaking in for `>=`, or an unknown
/// level (e.g. 4) being treated as lower than admin.
#[test]
fn given_all_role_pairs_when_has_role_then_equals_greater_or_equal() {
    for held in 0..=5u8 {
        let manager = manager_with_role(held);
        for required in 0..=5u8 {
            // WHEN/THEN: Holding `held`, requiring `required`
            assert_eq!(
                manager.has_role(RoleLevel(required)),
                held >= required,
                "held {held}, required {required}"
            );
        }
    }
}

#[test]
fn given_no_session_when_has_role_then_false() {
    let manager = SessionManager::with_session(Arc::new(MemoryTokenStore::new()), None);

    assert!(!manager.has_role(RoleLevel(0)));
    assert!(!manager.has_exact_role(RoleLevel::VIEWER));
}

#[test]
fn given_operator_when_has_exact_role_then_only_operator_matches() {
    let manager = manager_with_role(2);

    assert!(manager.has_exact_role(RoleLevel::OPERATOR));
    assert!(!manager.has_exact_role(RoleLevel::VIEWER));
    assert!(!manager.has_exact_role(RoleLevel::ADMIN));
}

#[test]
fn given_role_levels_when_labelled_then_unknown_falls_back_to_viewer() {
    assert_eq!(RoleLevel::VIEWER.label(), "Viewer");
    assert_eq!(RoleLevel::OPERATOR.label(), "Operator");
    assert_eq!(RoleLevel::ADMIN.label(), "Administrator");
    assert_eq!(RoleLevel(9).label(), "Viewer");
    assert_eq!(RoleLevel::ADMIN.to_string(), "Administrator (3)");
}

#[test]
fn given_role_json_when_deserialized_then_plain_integer() {
    let role: RoleLevel = serde_json::from_str("2").unwrap();

    assert_eq!(role, RoleLevel::OPERATOR);
    assert_eq!(serde_json::to_string(&RoleLevel::ADMIN).unwrap(), "3");
}
