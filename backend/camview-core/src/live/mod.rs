//! Live camera frames over WebSocket.
//!
//! One [`LiveFrameChannel`] per viewed camera. Delivery is pull-based: the
//! client grants one credit (`"ready"`) after connecting and one after each
//! frame it consumes, and the server withholds the next frame until the credit
//! arrives. A slow client therefore never accumulates a backlog; at most one
//! frame is in flight and at most one is buffered.
//!
//! # Protocol
//!
//! - Endpoint: `ws(s)://<host>/ws/stream/<camera_id>`
//! - Client → server: the text `"ready"`
//! - Server → client: JSON text, either `{"error": ...}` or
//!   `{"image": <base64 JPEG>}` / `{"i": <base64 JPEG>}`
//!
//! The transport sits behind [`FrameConnector`] / [`FrameTransport`] so the
//! channel logic runs unchanged against a scripted transport in tests.

mod channel;
pub mod frame;
pub mod state;
pub mod transport;
pub mod ws;

pub use channel::{CONNECTION_ERROR_TEXT, ChannelSnapshot, LiveFrameChannel};
pub use frame::{Frame, FrameMessage, parse_frame_message};
pub use state::ChannelState;
pub use transport::{CREDIT_MESSAGE, FrameConnector, FrameTransport, TransportEvent};
pub use ws::{WsConnector, WsTransport, stream_url};
