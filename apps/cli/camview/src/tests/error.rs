// Unit tests for error module
// Tests serialization (used by --json) and the mapping of core errors

use crate::error::CamviewError;

use camview_core::error::{ApiError, AuthError, CoreError, ShellError};
use camview_core::shell::Tab;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Tests that errors can be serialized for `--json`.
///
/// **WHY THIS MATTERS**: Scripts read failures from stderr as JSON. If
/// serialization breaks they get an opaque string instead.
///
/// **BUG THIS CATCHES**: Would catch if someone removes the `#[derive(Serialize)]`
/// or adds a non-serializable field to a variant.
#[test]
fn given_camview_error_when_serialized_then_contains_tag_and_message() {
    // GIVEN: A CamviewError
    let err = CamviewError::Unauthorized {
        message: String::from("Test"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Serializing to JSON
    let json = serde_json::to_string(&err).expect("Error should be serializable");

    // THEN: Variant tag and message are present
    assert!(
        json.contains(r#""type":"Unauthorized""#),
        "JSON should carry the variant tag: {json}"
    );
    assert!(json.contains("Test"), "JSON should contain message");
}

/// **VALUE**: Verifies that a role too low for a tab maps to the Unauthorized exit code.
///
/// **WHY THIS MATTERS**: Scripts tell "log in again" apart from "ask an admin"
/// by exit code.
///
/// **BUG THIS CATCHES**: Would catch if shell authorization errors fell into the
/// generic Core bucket.
#[test]
fn given_shell_unauthorized_when_converted_then_exit_code_is_four() {
    // GIVEN: The shell refusing the Users tab
    let shell_error = ShellError::unauthorized(Tab::Users);

    // WHEN: Converting to the app error
    let err = CamviewError::from(shell_error);

    // THEN: Unauthorized, naming the tab
    assert!(matches!(err, CamviewError::Unauthorized { .. }));
    assert_eq!(err.exit_code(), 4);
    assert!(err.to_string().contains("Users"));
}

/// **VALUE**: Verifies that a missing session maps to Authentication with a login hint.
///
/// **BUG THIS CATCHES**: Would catch if NotAuthenticated were reported as an
/// internal failure with no hint on what to do.
#[test]
fn given_not_authenticated_when_converted_then_hints_at_login() {
    // GIVEN/WHEN
    let err = CamviewError::from(ShellError::not_authenticated());

    // THEN
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("camview login"));
}

/// **VALUE**: Verifies that an HTTP 401 from a feature call reads as an expired session.
///
/// **WHY THIS MATTERS**: The stored token is validated at startup only; a token
/// revoked later surfaces as 401 on the next call.
///
/// **BUG THIS CATCHES**: Would catch if 401 were reported as a generic server error.
#[test]
fn given_api_unauthorized_when_converted_then_reports_expired_session() {
    // GIVEN: A 401 from the backend, wrapped in CoreError as the shell returns it
    let core = CoreError::from(ApiError::from_status(401, "Invalid token"));

    // WHEN
    let err = CamviewError::from(core);

    // THEN
    assert!(matches!(err, CamviewError::Authentication { .. }));
    assert!(err.to_string().contains("Session expired"));
}

/// **VALUE**: Verifies that other API failures keep their details under Core.
#[test]
fn given_api_server_error_when_converted_then_core_error_keeps_body() {
    // GIVEN
    let api_error = ApiError::from_status(500, "database offline");

    // WHEN
    let err = CamviewError::from(api_error);

    // THEN
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("database offline"));
}

/// **VALUE**: Verifies that login failures keep the server's user-facing message.
#[test]
fn given_invalid_credentials_when_converted_then_authentication_error() {
    // GIVEN
    let auth_error = AuthError::from_http_response(401, r#"{"detail":"Bad password"}"#);

    // WHEN
    let err = CamviewError::from(CoreError::from(auth_error));

    // THEN
    assert!(matches!(err, CamviewError::Authentication { .. }));
    assert!(err.to_string().contains("Bad password"));
}
