use crate::RedactedToken;

/// **VALUE**: Verifies the token value never appears in Debug or Display output.
///
/// **WHY THIS MATTERS**: Sessions are logged at info level (`{:?}` of Session).
/// A leaked bearer token in a log file grants full access to the backend.
///
/// **BUG THIS CATCHES**: Would catch someone replacing the manual Debug impl with
/// `#[derive(Debug)]`.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token
    let token = RedactedToken::new("super-secret-jwt");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    // THEN: The secret never appears
    assert!(!debug.contains("super-secret-jwt"));
    assert!(!display.contains("super-secret-jwt"));
    assert_eq!(display, "Bearer [REDACTED]");
    assert!(debug.contains("len: 16"), "got {debug}");
    assert_eq!(token.as_str(), "super-secret-jwt");
    assert_eq!(token.len(), 16);
}

/// **VALUE**: Verifies serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a derived `Serialize` sneaking the token
/// into a JSON config or IPC payload.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = RedactedToken::new("T");

    let result = serde_json::to_string(&token);

    let err = result.expect_err("RedactedToken must refuse serialization");
    assert!(err.to_string().contains("TokenStore::save"), "got {err}");
}
