//! Typed per-connection metadata

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::correlation::CorrelationContext;
use crate::telemetry::{HttpClientEvents, NoopEvents};

static CONNECTION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique connection identifier.
#[must_use]
pub fn next_connection_id() -> u64 {
    CONNECTION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Record attached to a connection at acquisition time.
///
/// `events` is the instrumentation sink for writes on this connection and
/// `correlation` the context attached for the current attempt, if any.
#[derive(Clone)]
pub struct ConnectionMetadata {
    pub id: u64,
    pub events: Arc<dyn HttpClientEvents>,
    pub correlation: Option<CorrelationContext>,
}

impl ConnectionMetadata {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            events: Arc::new(NoopEvents),
            correlation: None,
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn HttpClientEvents>) -> Self {
        self.events = events;
        self
    }
}

impl Default for ConnectionMetadata {
    fn default() -> Self {
        Self::new(next_connection_id())
    }
}

impl fmt::Debug for ConnectionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionMetadata")
            .field("id", &self.id)
            .field("publishing", &self.events.publishing_enabled())
            .field("correlation", &self.correlation)
            .finish()
    }
}
