use crate::error::ChannelError;
use crate::live::stream_url;

use url::Url;

/// **VALUE**: Verifies the WebSocket scheme follows the HTTP scheme.
///
/// **BUG THIS CATCHES**: Would catch a hard-coded `ws://` that breaks every
/// deployment behind TLS (browsers and proxies refuse mixed content).
#[test]
fn given_http_and_https_base_when_stream_url_then_ws_and_wss() {
    let http = Url::parse("http://localhost:8000/").unwrap();
    let https = Url::parse("https://cams.example.com/app/").unwrap();

    assert_eq!(
        stream_url(&http, "cam1").unwrap().as_str(),
        "ws://localhost:8000/ws/stream/cam1"
    );
    assert_eq!(
        stream_url(&https, "cam1").unwrap().as_str(),
        "wss://cams.example.com/app/ws/stream/cam1"
    );
}

#[test]
fn given_camera_id_with_reserved_chars_when_stream_url_then_single_segment() {
    let base = Url::parse("http://localhost:8000/").unwrap();

    let url = stream_url(&base, "lobby/1 a").unwrap();

    assert_eq!(url.path(), "/ws/stream/lobby%2F1%20a");
}

#[test]
fn given_non_http_base_when_stream_url_then_error() {
    let base = Url::parse("ftp://localhost/").unwrap();

    assert!(matches!(stream_url(&base, "cam1"), Err(ChannelError::Url { .. })));
}
