//! Lock-free request write metrics

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use crossbeam_utils::CachePadded;

use super::events::HttpClientEvents;
use crate::error::Error;

/// Write instrumentation sink backed by cache-padded atomic counters.
///
/// Each counter sits on its own cache line so concurrent attempts
/// recording into the same collector do not contend.
#[derive(Debug)]
pub struct MetricsCollector {
    enabled: AtomicBool,
    /// Requests whose first frame was handed to a connection
    pub submitted: CachePadded<AtomicUsize>,
    /// Requests whose frames were all accepted
    pub write_complete: CachePadded<AtomicUsize>,
    /// Requests whose write failed
    pub write_failed: CachePadded<AtomicUsize>,
    /// Total write time across complete and failed writes, in nanoseconds
    pub total_write_time_nanos: CachePadded<AtomicU64>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create an enabled collector
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            submitted: CachePadded::new(AtomicUsize::new(0)),
            write_complete: CachePadded::new(AtomicUsize::new(0)),
            write_failed: CachePadded::new(AtomicUsize::new(0)),
            total_write_time_nanos: CachePadded::new(AtomicU64::new(0)),
        }
    }

    /// Turn publishing on or off. Attempts already in flight keep the
    /// setting they observed when they started.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    fn record_elapsed(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .total_write_time_nanos
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |total| {
                Some(total.saturating_add(nanos))
            });
    }

    /// Get current metrics snapshot
    #[must_use]
    pub fn snapshot(&self) -> WriteMetrics {
        let write_complete = self.write_complete.load(Ordering::Relaxed);
        let write_failed = self.write_failed.load(Ordering::Relaxed);
        let total_nanos = self.total_write_time_nanos.load(Ordering::Relaxed);
        let finished = (write_complete + write_failed) as u64;

        let average_write_time = if finished > 0 {
            Duration::from_nanos(total_nanos / finished)
        } else {
            Duration::ZERO
        };

        WriteMetrics {
            submitted: self.submitted.load(Ordering::Relaxed),
            write_complete,
            write_failed,
            average_write_time,
        }
    }
}

impl HttpClientEvents for MetricsCollector {
    fn publishing_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn on_request_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    fn on_request_write_complete(&self, elapsed: Duration) {
        self.write_complete.fetch_add(1, Ordering::Relaxed);
        self.record_elapsed(elapsed);
    }

    fn on_request_write_failed(&self, elapsed: Duration, error: &Error) {
        tracing::debug!(target: "reqflow::metrics", error = %error, "request write failed");
        self.write_failed.fetch_add(1, Ordering::Relaxed);
        self.record_elapsed(elapsed);
    }
}

/// Write metrics snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteMetrics {
    pub submitted: usize,
    pub write_complete: usize,
    pub write_failed: usize,
    /// Average over finished writes
    pub average_write_time: Duration,
}

impl WriteMetrics {
    /// Submitted writes that have not yet completed or failed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.submitted
            .saturating_sub(self.write_complete + self.write_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_averages() {
        let metrics = MetricsCollector::new();
        metrics.on_request_submitted();
        metrics.on_request_submitted();
        metrics.on_request_write_complete(Duration::from_millis(10));
        metrics.on_request_write_failed(Duration::from_millis(30), &crate::error::write("boom"));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.submitted, 2);
        assert_eq!(snapshot.write_complete, 1);
        assert_eq!(snapshot.write_failed, 1);
        assert_eq!(snapshot.average_write_time, Duration::from_millis(20));
        assert_eq!(snapshot.in_flight(), 0);
    }

    #[test]
    fn total_write_time_saturates() {
        let metrics = MetricsCollector::new();
        metrics.on_request_write_complete(Duration::MAX);
        metrics.on_request_write_complete(Duration::MAX);

        assert_eq!(
            metrics.snapshot().average_write_time,
            Duration::from_nanos(u64::MAX / 2)
        );
    }

    #[test]
    fn disabled_collector_reports_disabled() {
        let metrics = MetricsCollector::new();
        metrics.set_enabled(false);
        assert!(!metrics.publishing_enabled());
    }
}
