use crate::api::Camera;
use crate::live::frame::{Frame, FrameMessage, parse_frame_message};
use crate::live::state::ChannelState;
use crate::live::transport::{FrameConnector, FrameTransport, TransportEvent};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use log::{debug, error, info, warn};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Shown when the connection fails without a server-supplied reason.
pub const CONNECTION_ERROR_TEXT: &str = "WebSocket connection error";

/// Throughput is logged once per this many frames.
const FPS_LOG_INTERVAL: u64 = 50;

/// Point-in-time view of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub camera_id: String,
    pub state: ChannelState,
    pub last_error: Option<String>,
    pub frame: Option<Frame>,
    pub frames_received: u64,
}

#[derive(Debug)]
struct Inner {
    /// Identifies the connection allowed to mutate this state.
    generation: Uuid,
    state: ChannelState,
    last_error: Option<String>,
    frame: Option<Frame>,
    frames_received: u64,
    /// Frames over every connection; numbers [`Frame::sequence`].
    frames_total: u64,
    credits_sent: u64,
}

#[derive(Debug)]
struct Shared {
    inner: Mutex<Inner>,
    state_tx: watch::Sender<ChannelState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply `f` only if `generation` is still current.
    fn update<R>(&self, generation: Uuid, f: impl FnOnce(&mut Inner) -> R) -> Option<R> {
        let mut inner = self.lock();
        if inner.generation != generation {
            return None;
        }
        let result = f(&mut inner);
        self.state_tx.send_replace(inner.state);
        Some(result)
    }

    /// Invalidate the running connection and move to `state`.
    fn retire(&self, state: ChannelState) -> Uuid {
        let mut inner = self.lock();
        inner.generation = Uuid::new_v4();
        inner.state = state;
        self.state_tx.send_replace(state);
        inner.generation
    }
}

struct Pump {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

/// A credit-based live frame stream for one camera.
///
/// The connection runs on a background task. Each connection carries a
/// generation id; once [`close`](Self::close), [`reconnect`](Self::reconnect) or
/// drop retires it, nothing that connection observes afterwards reaches the
/// channel state.
pub struct LiveFrameChannel<C: FrameConnector> {
    camera: Camera,
    connector: Arc<C>,
    shared: Arc<Shared>,
    pump: Option<Pump>,
}

impl<C: FrameConnector> LiveFrameChannel<C> {
    /// Start connecting to `camera`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn open(camera: Camera, connector: Arc<C>) -> Self {
        let (state_tx, _) = watch::channel(ChannelState::Disconnected);
        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                generation: Uuid::new_v4(),
                state: ChannelState::Disconnected,
                last_error: None,
                frame: None,
                frames_received: 0,
                frames_total: 0,
                credits_sent: 0,
            }),
            state_tx,
        });

        let mut channel = Self {
            camera,
            connector,
            shared,
            pump: None,
        };
        channel.start(ChannelState::Connecting);
        channel
    }

    fn start(&mut self, initial: ChannelState) {
        let generation = {
            let mut inner = self.shared.lock();
            inner.generation = Uuid::new_v4();
            inner.state = initial;
            inner.last_error = None;
            inner.frames_received = 0;
            self.shared.state_tx.send_replace(initial);
            inner.generation
        };

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run_pump(
            Arc::clone(&self.connector),
            self.camera.id.clone(),
            Arc::clone(&self.shared),
            generation,
            shutdown_rx,
        ));

        self.pump = Some(Pump {
            shutdown: Some(shutdown_tx),
            task,
        });
    }

    async fn stop_pump(&mut self) {
        if let Some(mut pump) = self.pump.take() {
            if let Some(shutdown) = pump.shutdown.take() {
                let _ = shutdown.send(());
            }
            if let Err(e) = pump.task.await
                && e.is_panic()
            {
                error!("Camera {}: frame pump panicked", self.camera.id);
            }
        }
    }

    /// Tear down the current connection and open a fresh one.
    ///
    /// The last frame stays visible until a new one arrives.
    pub async fn reconnect(&mut self) {
        info!("Reconnecting to camera {}", self.camera.id);
        self.shared.retire(ChannelState::Reconnecting);
        self.stop_pump().await;
        self.start(ChannelState::Reconnecting);
    }

    /// Close the connection. No further state changes happen afterwards.
    pub async fn close(&mut self) {
        self.shared.retire(ChannelState::Disconnected);
        self.stop_pump().await;
        debug!("Closed channel for camera {}", self.camera.id);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_id(&self) -> &str {
        &self.camera.id
    }

    pub fn state(&self) -> ChannelState {
        self.shared.lock().state
    }

    pub fn can_reconnect(&self) -> bool {
        self.state().can_reconnect()
    }

    pub fn current_frame(&self) -> Option<Frame> {
        self.shared.lock().frame.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.shared.lock().last_error.clone()
    }

    /// Frames received on the current connection.
    pub fn frames_received(&self) -> u64 {
        self.shared.lock().frames_received
    }

    /// Credits granted over the lifetime of the channel.
    pub fn credits_sent(&self) -> u64 {
        self.shared.lock().credits_sent
    }

    pub fn snapshot(&self) -> ChannelSnapshot {
        let inner = self.shared.lock();
        ChannelSnapshot {
            camera_id: self.camera.id.clone(),
            state: inner.state,
            last_error: inner.last_error.clone(),
            frame: inner.frame.clone(),
            frames_received: inner.frames_received,
        }
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ChannelState> {
        self.shared.state_tx.subscribe()
    }
}

impl<C: FrameConnector> Drop for LiveFrameChannel<C> {
    fn drop(&mut self) {
        if let Some(mut pump) = self.pump.take() {
            self.shared.retire(ChannelState::Disconnected);
            if let Some(shutdown) = pump.shutdown.take() {
                let _ = shutdown.send(());
            }
        }
    }
}

enum PumpStep {
    Shutdown,
    Event(TransportEvent),
}

async fn run_pump<C: FrameConnector>(
    connector: Arc<C>,
    camera_id: String,
    shared: Arc<Shared>,
    generation: Uuid,
    mut shutdown: oneshot::Receiver<()>,
) {
    if shared
        .update(generation, |inner| inner.state = ChannelState::Connecting)
        .is_none()
    {
        return;
    }

    let connected = tokio::select! {
        _ = &mut shutdown => None,
        result = connector.connect(&camera_id) => Some(result),
    };

    let mut transport = match connected {
        None => return,
        Some(Ok(transport)) => transport,
        Some(Err(e)) => {
            error!("Camera {camera_id}: {e}");
            shared.update(generation, |inner| {
                inner.state = ChannelState::Error;
                inner.last_error = Some(CONNECTION_ERROR_TEXT.to_string());
            });
            return;
        }
    };

    if shared
        .update(generation, |inner| inner.state = ChannelState::Connected)
        .is_none()
    {
        transport.close().await;
        return;
    }
    info!("Connected to camera {camera_id}");

    grant_credit(&mut transport, &shared, generation, &camera_id).await;

    let started = Instant::now();

    loop {
        let step = tokio::select! {
            _ = &mut shutdown => PumpStep::Shutdown,
            event = transport.next_event() => PumpStep::Event(event),
        };

        match step {
            PumpStep::Shutdown => {
                transport.close().await;
                return;
            }
            PumpStep::Event(TransportEvent::Message(text)) => match parse_frame_message(&text) {
                Ok(FrameMessage::Image(bytes)) => {
                    let received = shared.update(generation, |inner| {
                        inner.frames_received += 1;
                        inner.frames_total += 1;
                        inner.frame = Some(Frame::new(bytes, inner.frames_total));
                        inner.frames_received
                    });
                    let Some(received) = received else {
                        transport.close().await;
                        return;
                    };

                    if received % FPS_LOG_INTERVAL == 0 {
                        let elapsed = started.elapsed().as_secs_f64();
                        if elapsed > 0.0 {
                            info!(
                                "Camera {camera_id}: {received} frames, ~{:.1} FPS",
                                received as f64 / elapsed
                            );
                        }
                    }

                    grant_credit(&mut transport, &shared, generation, &camera_id).await;
                }
                Ok(FrameMessage::Error(message)) => {
                    warn!("Camera {camera_id}: server error: {message}");
                    shared.update(generation, |inner| {
                        inner.state = ChannelState::Error;
                        inner.last_error = Some(message);
                    });
                }
                Err(e) => {
                    warn!("Camera {camera_id}: dropping malformed message: {e}");
                }
            },
            PumpStep::Event(TransportEvent::Error(message)) => {
                error!("Camera {camera_id}: transport error: {message}");
                shared.update(generation, |inner| {
                    inner.state = ChannelState::Error;
                    inner.last_error = Some(CONNECTION_ERROR_TEXT.to_string());
                });
            }
            PumpStep::Event(TransportEvent::Closed { code, reason }) => {
                info!("Camera {camera_id}: stream closed (code {code:?}) {reason}");
                shared.update(generation, |inner| {
                    inner.state = ChannelState::Disconnected;
                });
                return;
            }
        }
    }
}

async fn grant_credit<T: FrameTransport>(
    transport: &mut T,
    shared: &Shared,
    generation: Uuid,
    camera_id: &str,
) {
    match transport.send_credit().await {
        Ok(()) => {
            shared.update(generation, |inner| inner.credits_sent += 1);
        }
        Err(e) => warn!("Camera {camera_id}: {e}"),
    }
}
