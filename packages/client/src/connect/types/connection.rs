//! Connection and provider traits
//!
//! A provider hands out one exclusively owned connection per attempt. The
//! connection accepts a whole frame stream for writing, yields inbound
//! messages one at a time, and takes out-of-band control events on a
//! separate channel from the frames.

use futures::future::BoxFuture;
use futures::stream::BoxStream;

use super::metadata::ConnectionMetadata;
use crate::correlation::CorrelationContext;
use crate::error::Result;
use crate::http::RequestDescriptor;
use crate::protocols::{Frame, Inbound};

/// Frames handed to [`Connection::write`].
pub type FrameStream<C> = BoxStream<'static, Result<Frame<C>>>;

/// Side-channel signal delivered to a connection outside the frame stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// A new correlation context applies to the upcoming write.
    NewContext(CorrelationContext),
}

/// One physical connection, owned by a single attempt.
pub trait Connection<C: Send + 'static>: Send {
    fn metadata(&self) -> &ConnectionMetadata;

    fn metadata_mut(&mut self) -> &mut ConnectionMetadata;

    /// Delivers a control event ahead of any frames.
    fn fire_event(&mut self, event: ControlEvent) -> Result<()>;

    /// Drains `frames` into the connection.
    ///
    /// Resolves once every frame has been accepted, or with the first error
    /// from either the frames or the transport.
    fn write(&mut self, frames: FrameStream<C>) -> BoxFuture<'_, Result<()>>;

    /// Next inbound message, or `None` once the peer has closed.
    fn read(&mut self) -> BoxFuture<'_, Option<Result<Inbound>>>;

    /// Releases the connection. Further reads yield `None`.
    fn close(&mut self);
}

/// Source of fresh connections.
pub trait ConnectionProvider<C: Send + 'static>: Send + Sync {
    /// Acquires a new connection suitable for `target`.
    fn acquire<'a>(
        &'a self,
        target: &'a RequestDescriptor,
    ) -> BoxFuture<'a, Result<Box<dyn Connection<C>>>>;
}
