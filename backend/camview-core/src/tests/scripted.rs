// Scripted frame transport for channel and shell tests.
//
// Messages are only delivered against a credit, like the real server. Close
// and error events need none. Once the script runs out the stream hangs.

use crate::error::ChannelError;
use crate::live::{FrameConnector, FrameTransport, TransportEvent};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wire {
    Credit,
    Delivered(String),
    ServerClosed,
    ClientClosed,
}

#[derive(Default)]
pub struct ScriptedConnector {
    scripts: Mutex<VecDeque<Vec<TransportEvent>>>,
    pub wire: Arc<Mutex<Vec<Wire>>>,
    pub connects: Mutex<Vec<String>>,
    fail: bool,
}

impl ScriptedConnector {
    /// One script per connection, consumed in order.
    pub fn new(scripts: Vec<Vec<TransportEvent>>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn wire(&self) -> Vec<Wire> {
        self.wire.lock().unwrap().clone()
    }

    pub fn credits(&self) -> usize {
        self.wire().iter().filter(|w| **w == Wire::Credit).count()
    }

    pub fn connect_count(&self) -> usize {
        self.connects.lock().unwrap().len()
    }
}

impl FrameConnector for ScriptedConnector {
    type Transport = ScriptedTransport;

    async fn connect(&self, camera_id: &str) -> Result<ScriptedTransport, ChannelError> {
        self.connects.lock().unwrap().push(camera_id.to_string());
        if self.fail {
            return Err(ChannelError::connect(camera_id, "connection refused"));
        }

        let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        Ok(ScriptedTransport {
            events: script.into(),
            credits: 0,
            wire: Arc::clone(&self.wire),
        })
    }
}

pub struct ScriptedTransport {
    events: VecDeque<TransportEvent>,
    credits: usize,
    wire: Arc<Mutex<Vec<Wire>>>,
}

impl FrameTransport for ScriptedTransport {
    async fn send_credit(&mut self) -> Result<(), ChannelError> {
        self.credits += 1;
        self.wire.lock().unwrap().push(Wire::Credit);
        Ok(())
    }

    async fn next_event(&mut self) -> TransportEvent {
        let ready = match self.events.front() {
            Some(TransportEvent::Message(_)) => self.credits > 0,
            Some(_) => true,
            None => false,
        };
        if !ready {
            std::future::pending::<()>().await;
        }

        let Some(event) = self.events.pop_front() else {
            unreachable!("ready implies a queued event");
        };
        match &event {
            TransportEvent::Message(text) => {
                self.credits -= 1;
                self.wire.lock().unwrap().push(Wire::Delivered(text.clone()));
            }
            TransportEvent::Closed { .. } => self.wire.lock().unwrap().push(Wire::ServerClosed),
            TransportEvent::Error(_) => {}
        }
        event
    }

    async fn close(&mut self) {
        self.wire.lock().unwrap().push(Wire::ClientClosed);
    }
}

pub fn image_message(bytes: &[u8]) -> TransportEvent {
    TransportEvent::Message(format!(r#"{{"i":"{}"}}"#, BASE64.encode(bytes)))
}

pub fn closed() -> TransportEvent {
    TransportEvent::Closed {
        code: Some(1000),
        reason: String::new(),
    }
}

/// Poll `condition` until it holds or a second passes.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
