//! Connection abstractions

pub mod connection;
pub mod metadata;

pub use connection::{Connection, ConnectionProvider, ControlEvent, FrameStream};
pub use metadata::{ConnectionMetadata, next_connection_id};
