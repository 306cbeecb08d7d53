//! Request write instrumentation hooks

use std::time::Duration;

use crate::error::Error;

/// Sink notified around every request write.
///
/// The executor checks [`publishing_enabled`](Self::publishing_enabled)
/// once per attempt and skips timing and every callback when it is false.
pub trait HttpClientEvents: Send + Sync {
    fn publishing_enabled(&self) -> bool;

    /// The first frame is about to be written.
    fn on_request_submitted(&self) {}

    /// Every frame was accepted by the connection.
    fn on_request_write_complete(&self, _elapsed: Duration) {}

    /// Writing failed after `elapsed`.
    fn on_request_write_failed(&self, _elapsed: Duration, _error: &Error) {}
}

/// Sink that never publishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl HttpClientEvents for NoopEvents {
    fn publishing_enabled(&self) -> bool {
        false
    }
}
