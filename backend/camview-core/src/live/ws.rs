//! WebSocket transport for live frames.

use crate::error::ChannelError;
use crate::live::transport::{CREDIT_MESSAGE, FrameConnector, FrameTransport, TransportEvent};

use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

const STREAM_PATH: &str = "ws/stream/";

/// Stream endpoint for `camera_id`, derived from the HTTP base URL.
///
/// `http` maps to `ws` and `https` to `wss`; the camera id is
/// percent-encoded as a single path segment.
pub fn stream_url(base_url: &Url, camera_id: &str) -> Result<Url, ChannelError> {
    let mut url = base_url.join(STREAM_PATH)?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ChannelError::url(format!("'{base_url}' cannot be a base URL")))?;
        segments.pop_if_empty().push(camera_id);
    }

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(ChannelError::url(format!(
                "unsupported scheme '{other}' for a stream URL"
            )));
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| ChannelError::url(format!("cannot switch '{url}' to {scheme}")))?;

    Ok(url)
}

/// Connects to `ws(s)://<host>/ws/stream/<camera_id>`.
#[derive(Debug, Clone)]
pub struct WsConnector {
    base_url: Url,
}

impl WsConnector {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl FrameConnector for WsConnector {
    type Transport = WsTransport;

    async fn connect(&self, camera_id: &str) -> Result<WsTransport, ChannelError> {
        let url = stream_url(&self.base_url, camera_id)?;
        debug!("Connecting to {url}");

        let (stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| ChannelError::connect(camera_id, e.to_string()))?;

        Ok(WsTransport {
            camera_id: camera_id.to_string(),
            stream,
            finished: false,
        })
    }
}

pub struct WsTransport {
    camera_id: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    finished: bool,
}

impl FrameTransport for WsTransport {
    async fn send_credit(&mut self) -> Result<(), ChannelError> {
        self.stream
            .send(Message::Text(CREDIT_MESSAGE.to_string().into()))
            .await
            .map_err(|e| ChannelError::send(&self.camera_id, e.to_string()))
    }

    async fn next_event(&mut self) -> TransportEvent {
        loop {
            if self.finished {
                return TransportEvent::Closed {
                    code: None,
                    reason: String::new(),
                };
            }

            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return TransportEvent::Message(text.to_string());
                }
                Some(Ok(Message::Binary(data))) => {
                    warn!("Camera {}: binary message on a text stream", self.camera_id);
                    return TransportEvent::Message(String::from_utf8_lossy(&data).into_owned());
                }
                Some(Ok(Message::Close(frame))) => {
                    self.finished = true;
                    let (code, reason) = match frame {
                        Some(frame) => (Some(u16::from(frame.code)), frame.reason.to_string()),
                        None => (None, String::new()),
                    };
                    return TransportEvent::Closed { code, reason };
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    self.finished = true;
                    return TransportEvent::Error(e.to_string());
                }
                None => {
                    self.finished = true;
                    return TransportEvent::Closed {
                        code: None,
                        reason: String::new(),
                    };
                }
            }
        }
    }

    async fn close(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if let Err(e) = self.stream.close(None).await {
            debug!("Camera {}: close handshake failed: {e}", self.camera_id);
        }
    }
}
