use crate::support::{TOKEN, mount_me, output};

use camview::cli::WatchArgs;
use camview::commands::live;
use camview::error::CamviewError;

use camview_core::auth::{MemoryTokenStore, SessionManager};
use camview_core::error::ChannelError;
use camview_core::live::{FrameConnector, FrameTransport, TransportEvent};
use camview_core::shell::ViewShell;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Replays `frames` and then closes, except for the cameras in `endless`,
/// which stream numbered frames until the client goes away.
struct ReplayConnector {
    frames: Vec<Vec<u8>>,
    endless: Vec<String>,
}

struct ReplayTransport {
    events: VecDeque<TransportEvent>,
    endless: bool,
    streamed: u64,
}

fn frame_message(bytes: &[u8]) -> TransportEvent {
    TransportEvent::Message(json!({"i": BASE64.encode(bytes)}).to_string())
}

impl FrameConnector for ReplayConnector {
    type Transport = ReplayTransport;

    async fn connect(&self, camera_id: &str) -> Result<ReplayTransport, ChannelError> {
        let endless = self.endless.iter().any(|id| id == camera_id);
        let mut events = VecDeque::new();
        if !endless {
            events.extend(self.frames.iter().map(|bytes| frame_message(bytes)));
            events.push_back(TransportEvent::Closed {
                code: Some(1000),
                reason: "done".to_string(),
            });
        }
        Ok(ReplayTransport {
            events,
            endless,
            streamed: 0,
        })
    }
}

impl FrameTransport for ReplayTransport {
    async fn send_credit(&mut self) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn next_event(&mut self) -> TransportEvent {
        if let Some(event) = self.events.pop_front() {
            return event;
        }
        if !self.endless {
            return std::future::pending().await;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.streamed += 1;
        frame_message(format!("live {}", self.streamed).as_bytes())
    }

    async fn close(&mut self) {}
}

/// Frame count from the closing `<camera>: N frames` summary line.
fn frames_reported(text: &str, camera_id: &str) -> u64 {
    let prefix = format!("{camera_id}: ");
    text.lines()
        .filter_map(|line| line.strip_prefix(&prefix))
        .filter_map(|rest| rest.strip_suffix(" frames"))
        .find_map(|count| count.parse().ok())
        .unwrap_or_else(|| panic!("no frame count for {camera_id} in {text}"))
}

async fn viewer_shell(
    server: &MockServer,
    frames: Vec<Vec<u8>>,
    endless: &[&str],
    max_cameras: usize,
) -> ViewShell<ReplayConnector> {
    mount_me(server, 1).await;
    Mock::given(method("GET"))
        .and(path("/cameras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "cam1", "name": "Entrance"},
            {"id": "cam2", "name": "Yard"}
        ])))
        .mount(server)
        .await;

    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let session = SessionManager::new(
        base_url,
        Arc::new(MemoryTokenStore::with_token(TOKEN)),
        Duration::from_secs(5),
    )
    .unwrap();
    let connector = ReplayConnector {
        frames,
        endless: endless.iter().map(|id| id.to_string()).collect(),
    };
    let mut shell = ViewShell::new(session, Arc::new(connector), max_cameras);
    shell.init().await;
    shell
}

/// **VALUE**: Verifies `watch` writes the newest frame of the auto-selected
/// camera and stops once the stream ends.
///
/// **WHY THIS MATTERS**: The frame file is the command's whole output; an older
/// frame left on disk looks like a frozen camera.
///
/// **BUG THIS CATCHES**: Would catch the loop never ending after the server
/// closes, or writing the first frame instead of the latest.
#[tokio::test]
async fn given_stream_of_two_frames_when_watching_then_latest_frame_on_disk() {
    // GIVEN: A viewer and a stream of two frames followed by close
    let server = MockServer::start().await;
    let mut shell = viewer_shell(&server, vec![b"first".to_vec(), b"second".to_vec()], &[], 4).await;
    let frames_dir = tempfile::TempDir::new().unwrap();
    let args = WatchArgs {
        cameras: Vec::new(),
        limit: None,
    };
    let mut out = Vec::new();

    // WHEN
    tokio::time::timeout(
        Duration::from_secs(5),
        live::watch(&mut shell, &args, frames_dir.path(), &mut out),
    )
    .await
    .expect("watch should end with the stream")
    .expect("watch should succeed");

    // THEN: The second frame is on disk and every channel is closed
    let written = std::fs::read(frames_dir.path().join("cam1.jpg")).unwrap();
    assert_eq!(written, b"second");
    let text = output(out);
    assert!(text.contains("Watching cam1"), "got {text}");
    assert!(text.contains("All streams ended"), "got {text}");
    assert!(text.contains("cam1: 2 frames"), "got {text}");
    assert!(shell.channels().is_empty());
}

/// **VALUE**: Verifies asking for more cameras than the grid holds is refused
/// and leaves nothing open.
///
/// **WHY THIS MATTERS**: Each camera holds a WebSocket to the backend; the cap
/// protects the server from one client opening every stream.
///
/// **BUG THIS CATCHES**: Would catch the cap being checked after connecting, or
/// the already opened channel leaking when the command fails.
#[tokio::test]
async fn given_grid_of_one_when_watching_two_cameras_then_limit_error_and_channels_closed() {
    // GIVEN: A shell capped at one camera
    let server = MockServer::start().await;
    let mut shell = viewer_shell(&server, vec![b"frame".to_vec()], &[], 1).await;
    let frames_dir = tempfile::TempDir::new().unwrap();
    let args = WatchArgs {
        cameras: vec!["cam1".to_string(), "cam2".to_string()],
        limit: Some(1),
    };

    // WHEN
    let err = live::watch(&mut shell, &args, frames_dir.path(), &mut Vec::new())
        .await
        .unwrap_err();

    // THEN
    assert!(matches!(err, CamviewError::Core { .. }));
    assert!(err.to_string().contains("already viewing 1 cameras"), "got {err}");
    assert!(shell.channels().is_empty());
}

/// **VALUE**: Verifies `--limit` ends `watch` while every stream is still
/// live.
///
/// **WHY THIS MATTERS**: `--limit` is how scripts grab a few frames and move
/// on; live cameras never close on their own.
///
/// **BUG THIS CATCHES**: Would catch the limit check never firing, leaving the
/// command running until Ctrl-C.
#[tokio::test]
async fn given_live_streams_when_watching_with_limit_then_stops_at_limit() {
    // GIVEN: Two cameras that never stop streaming
    let server = MockServer::start().await;
    let mut shell = viewer_shell(&server, Vec::new(), &["cam1", "cam2"], 4).await;
    let frames_dir = tempfile::TempDir::new().unwrap();
    let args = WatchArgs {
        cameras: vec!["cam1".to_string(), "cam2".to_string()],
        limit: Some(2),
    };
    let mut out = Vec::new();

    // WHEN
    tokio::time::timeout(
        Duration::from_secs(5),
        live::watch(&mut shell, &args, frames_dir.path(), &mut out),
    )
    .await
    .expect("watch --limit should end while streams are live")
    .expect("watch should succeed");

    // THEN: Both cameras reached the limit, frames are on disk, nothing is open
    let text = output(out);
    assert!(!text.contains("All streams ended"), "got {text}");
    assert!(frames_reported(&text, "cam1") >= 2, "got {text}");
    assert!(frames_reported(&text, "cam2") >= 2, "got {text}");
    assert!(frames_dir.path().join("cam1.jpg").exists());
    assert!(frames_dir.path().join("cam2.jpg").exists());
    assert!(shell.channels().is_empty());
}

/// **VALUE**: Verifies a stream that ended below the limit does not keep
/// `watch` running once the other streams reached it.
///
/// **WHY THIS MATTERS**: A closed stream gets no more frames without a
/// reconnect, so waiting for it to reach the limit waits forever.
///
/// **BUG THIS CATCHES**: Would catch the limit only counting frames, so one
/// early close blocks the command until Ctrl-C.
#[tokio::test]
async fn given_one_stream_ended_when_other_reaches_limit_then_watch_stops() {
    // GIVEN: cam1 sends one frame and closes, cam2 streams without end
    let server = MockServer::start().await;
    let mut shell = viewer_shell(&server, vec![b"only".to_vec()], &["cam2"], 4).await;
    let frames_dir = tempfile::TempDir::new().unwrap();
    let args = WatchArgs {
        cameras: vec!["cam1".to_string(), "cam2".to_string()],
        limit: Some(3),
    };
    let mut out = Vec::new();

    // WHEN
    tokio::time::timeout(
        Duration::from_secs(5),
        live::watch(&mut shell, &args, frames_dir.path(), &mut out),
    )
    .await
    .expect("watch --limit should end once the live stream reached it")
    .expect("watch should succeed");

    // THEN: cam1 kept its single frame, cam2 passed the limit
    let text = output(out);
    assert_eq!(frames_reported(&text, "cam1"), 1, "got {text}");
    assert!(frames_reported(&text, "cam2") >= 3, "got {text}");
    assert_eq!(std::fs::read(frames_dir.path().join("cam1.jpg")).unwrap(), b"only");
    assert!(shell.channels().is_empty());
}
