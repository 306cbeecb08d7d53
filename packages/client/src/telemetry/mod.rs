//! Instrumentation hooks for request writes
//!
//! [`HttpClientEvents`] is the hook contract the executor drives;
//! [`MetricsCollector`] is a counting implementation and [`NoopEvents`]
//! the default when nothing is configured.

pub mod events;
pub mod metrics;

pub use events::{HttpClientEvents, NoopEvents};
pub use metrics::{MetricsCollector, WriteMetrics};
