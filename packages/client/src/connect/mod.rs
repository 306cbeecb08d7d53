//! Connection collaborators
//!
//! The executor never establishes transports itself. It asks a
//! [`ConnectionProvider`] for one [`Connection`] per attempt and talks to it
//! only through frames, inbound messages and control events.

pub mod loopback;
pub mod types;

pub use loopback::{Exchange, LoopbackConnection, LoopbackProvider, Observed, RecordedAttempt};
pub use types::{
    Connection, ConnectionMetadata, ConnectionProvider, ControlEvent, FrameStream,
    next_connection_id,
};
