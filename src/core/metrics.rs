//! Session-scoped recorder metrics
//!
//! Counters shared by every logger attached to one
//! [`SinkRegistry`](super::SinkRegistry). Starting a new session resets them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for recorder observability
///
/// # Example
///
/// ```
/// use rust_profiling_logger::RecorderMetrics;
///
/// let metrics = RecorderMetrics::new();
///
/// metrics.record_flush();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.flush_count(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug)]
pub struct RecorderMetrics {
    /// Loggers created in the current session
    loggers_created: AtomicU64,

    /// Events appended across all loggers
    events_logged: AtomicU64,

    /// Completed calls to `Logger::flush`
    flush_count: AtomicU64,

    /// Snapshots successfully persisted by a sink
    sink_writes: AtomicU64,

    /// Snapshots a sink failed to persist (error or panic)
    sink_failures: AtomicU64,

    /// Flushes performed with a non-zero depth
    depth_mismatches: AtomicU64,
}

impl RecorderMetrics {
    pub const fn new() -> Self {
        Self {
            loggers_created: AtomicU64::new(0),
            events_logged: AtomicU64::new(0),
            flush_count: AtomicU64::new(0),
            sink_writes: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            depth_mismatches: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn loggers_created(&self) -> u64 {
        self.loggers_created.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_logged(&self) -> u64 {
        self.events_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_count(&self) -> u64 {
        self.flush_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_writes(&self) -> u64 {
        self.sink_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn depth_mismatches(&self) -> u64 {
        self.depth_mismatches.load(Ordering::Relaxed)
    }

    /// Record a created logger, returning the previous count
    #[inline]
    pub fn record_logger(&self) -> u64 {
        self.loggers_created.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_event(&self) -> u64 {
        self.events_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flush_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_write(&self) -> u64 {
        self.sink_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_depth_mismatch(&self) -> u64 {
        self.depth_mismatches.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate of sink writes as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no sink write was attempted.
    pub fn sink_failure_rate(&self) -> f64 {
        let failed = self.sink_failures() as f64;
        let total = self.sink_writes() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.loggers_created.store(0, Ordering::Relaxed);
        self.events_logged.store(0, Ordering::Relaxed);
        self.flush_count.store(0, Ordering::Relaxed);
        self.sink_writes.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.depth_mismatches.store(0, Ordering::Relaxed);
    }
}

impl Default for RecorderMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecorderMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            loggers_created: AtomicU64::new(self.loggers_created()),
            events_logged: AtomicU64::new(self.events_logged()),
            flush_count: AtomicU64::new(self.flush_count()),
            sink_writes: AtomicU64::new(self.sink_writes()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            depth_mismatches: AtomicU64::new(self.depth_mismatches()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = RecorderMetrics::new();
        assert_eq!(metrics.loggers_created(), 0);
        assert_eq!(metrics.events_logged(), 0);
        assert_eq!(metrics.flush_count(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.depth_mismatches(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = RecorderMetrics::new();
        assert_eq!(metrics.record_logger(), 0);
        assert_eq!(metrics.record_logger(), 1);
        assert_eq!(metrics.loggers_created(), 2);
    }

    #[test]
    fn test_sink_failure_rate() {
        let metrics = RecorderMetrics::new();
        assert_eq!(metrics.sink_failure_rate(), 0.0);

        for _ in 0..3 {
            metrics.record_sink_write();
        }
        metrics.record_sink_failure();
        assert_eq!(metrics.sink_failure_rate(), 25.0);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = RecorderMetrics::new();
        metrics.record_flush();
        metrics.record_event();
        metrics.record_depth_mismatch();

        metrics.reset();

        assert_eq!(metrics.flush_count(), 0);
        assert_eq!(metrics.events_logged(), 0);
        assert_eq!(metrics.depth_mismatches(), 0);
    }

    #[test]
    fn test_metrics_clone_is_independent() {
        let metrics = RecorderMetrics::new();
        metrics.record_flush();

        let snapshot = metrics.clone();
        metrics.record_flush();

        assert_eq!(metrics.flush_count(), 2);
        assert_eq!(snapshot.flush_count(), 1);
    }
}
