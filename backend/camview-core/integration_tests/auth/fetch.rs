use crate::support::{manager, memory_store};

use camview_core::auth::TokenStore;
use camview_core::error::ApiError;

use reqwest::StatusCode;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies no request leaves the client without a token.
///
/// **WHY THIS MATTERS**: An unauthenticated request to a protected endpoint
/// is never useful and leaks the request shape to the server logs.
///
/// **BUG THIS CATCHES**: Would catch `auth_fetch` sending the request first
/// and letting the backend answer 401.
#[tokio::test]
async fn given_no_stored_token_when_auth_fetch_then_missing_token_and_no_request() {
    // GIVEN: A backend that must not be called
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = manager(&server, memory_store(None)).auth_client();

    // WHEN: Issuing a protected call
    let url = client.endpoint("cameras").unwrap();
    let result = client.auth_fetch(client.request(reqwest::Method::GET, url)).await;

    // THEN: MissingToken, and the mock's expect(0) verifies on drop
    assert!(matches!(result, Err(ApiError::MissingToken { .. })));
}

#[tokio::test]
async fn given_stored_token_when_auth_fetch_then_bearer_header_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cameras"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;
    let client = manager(&server, memory_store(Some("T"))).auth_client();

    let url = client.endpoint("cameras").unwrap();
    let response = client
        .auth_fetch(client.request(reqwest::Method::GET, url))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// **VALUE**: Verifies a 401 is surfaced to the caller, not handled.
///
/// **BUG THIS CATCHES**: Would catch a hidden logout-on-401 in the fetch layer
/// clearing the token behind the session manager's back.
#[tokio::test]
async fn given_expired_token_when_get_json_then_unauthorized_surfaced_and_token_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cameras"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;
    let store = memory_store(Some("T"));
    let client = manager(&server, store.clone()).auth_client();

    let url = client.endpoint("cameras").unwrap();
    let error = client.get_json::<Vec<String>>(url).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(error.error_category(), "unauthorized");
    assert!(store.load().unwrap().is_some());
}
