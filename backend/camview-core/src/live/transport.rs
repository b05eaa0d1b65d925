use crate::error::ChannelError;

use std::future::Future;

/// The credit granting the server permission to send one frame.
pub const CREDIT_MESSAGE: &str = "ready";

/// What the transport observed next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A text message from the server.
    Message(String),
    /// The connection failed. A [`TransportEvent::Closed`] follows.
    Error(String),
    /// The connection ended. No further events follow.
    Closed { code: Option<u16>, reason: String },
}

/// An open, full-duplex frame stream for one camera.
pub trait FrameTransport: Send + 'static {
    fn send_credit(&mut self) -> impl Future<Output = Result<(), ChannelError>> + Send;

    fn next_event(&mut self) -> impl Future<Output = TransportEvent> + Send;

    /// Close the connection. Closing twice is a no-op.
    fn close(&mut self) -> impl Future<Output = ()> + Send;
}

/// Opens frame streams by camera id.
pub trait FrameConnector: Send + Sync + 'static {
    type Transport: FrameTransport;

    fn connect(
        &self,
        camera_id: &str,
    ) -> impl Future<Output = Result<Self::Transport, ChannelError>> + Send;
}
