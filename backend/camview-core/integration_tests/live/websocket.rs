use camview_core::api::Camera;
use camview_core::live::{CREDIT_MESSAGE, ChannelState, LiveFrameChannel, WsConnector};

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

const WAIT: Duration = Duration::from_secs(5);

/// What the stub server observed on one connection.
#[derive(Debug, Default)]
struct ServerLog {
    credits: usize,
    frames_sent: usize,
    bad_messages: Vec<String>,
}

/// Accept one connection and serve `frames` against credits, then close.
async fn serve_frames(frames: Vec<&'static [u8]>) -> (Url, oneshot::Receiver<ServerLog>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (done_tx, done_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        let (mut write, mut read) = ws.split();
        let mut log = ServerLog::default();
        let mut pending = frames.into_iter();

        while let Some(Ok(message)) = read.next().await {
            match message {
                Message::Text(text) if text.as_str() == CREDIT_MESSAGE => {
                    log.credits += 1;
                    match pending.next() {
                        Some(frame) => {
                            let body = format!(r#"{{"image":"{}"}}"#, BASE64.encode(frame));
                            write.send(Message::Text(body.into())).await.unwrap();
                            log.frames_sent += 1;
                        }
                        None => {
                            write.send(Message::Close(None)).await.unwrap();
                        }
                    }
                }
                Message::Close(_) => break,
                other => log.bad_messages.push(format!("{other:?}")),
            }
        }

        let _ = done_tx.send(log);
    });

    let base = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
    (base, done_rx)
}

/// **VALUE**: Verifies the channel speaks the real credit protocol over a
/// real WebSocket: `ws://` derived from `http://`, text credits, base64 JSON
/// frames.
///
/// **WHY THIS MATTERS**: The scripted unit tests prove the state machine;
/// this one proves the wire format matches what the server expects.
///
/// **BUG THIS CATCHES**: Would catch credits sent as binary frames, a wrong
/// stream path, or frames decoded from the wrong field.
#[tokio::test]
async fn given_stub_stream_server_when_channel_opened_then_frames_flow_against_credits() {
    // GIVEN: A server holding three frames
    let (base, done) = serve_frames(vec![b"f1", b"f2", b"f3"]).await;
    let connector = Arc::new(WsConnector::new(base));

    // WHEN: Opening a channel and waiting for the server to close
    let channel = LiveFrameChannel::open(Camera::new("cam1", "Entrance"), connector);
    let mut states = channel.subscribe();
    timeout(WAIT, states.wait_for(|s| *s == ChannelState::Disconnected))
        .await
        .expect("server should close the stream")
        .unwrap();

    // THEN: One credit per frame plus the connect credit
    let log = timeout(WAIT, done).await.unwrap().unwrap();
    assert_eq!(log.credits, 4);
    assert_eq!(log.frames_sent, 3);
    assert!(log.bad_messages.is_empty(), "unexpected: {:?}", log.bad_messages);

    let frame = channel.current_frame().expect("frame kept after close");
    assert_eq!(frame.bytes(), b"f3");
    assert_eq!(channel.frames_received(), 3);
}

#[tokio::test]
async fn given_nothing_listening_when_channel_opened_then_error_state() {
    // GIVEN: A port with no server
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let base = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();

    // WHEN: Opening a channel
    let channel = LiveFrameChannel::open(Camera::new("cam1", ""), Arc::new(WsConnector::new(base)));
    let mut states = channel.subscribe();
    timeout(WAIT, states.wait_for(|s| *s == ChannelState::Error))
        .await
        .expect("connect failure should surface")
        .unwrap();

    // THEN: A reconnect is offered
    assert!(channel.can_reconnect());
    assert!(channel.last_error().is_some());
}
