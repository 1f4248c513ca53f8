//! Per-unit-of-work event buffer

use super::{
    clock::{hrt_now, round_to_significant},
    event::EventRecord,
    outcome::{codes, Outcome},
    registry::SinkRegistry,
    scope::ProfileScope,
    sink::{Sink, SinkKind},
    snapshot::LoggerSnapshot,
    timestamp::TimestampFormat,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Significant digits kept by [`Logger::elapsed_since_start`]
pub const ELAPSED_SIGNIFICANT_DIGITS: u32 = 6;

/// A sink that failed during flush
#[derive(Debug, Clone, PartialEq)]
pub struct SinkFailure {
    pub kind: SinkKind,
    pub message: String,
}

/// What a flush did
#[derive(Debug, Clone)]
pub struct FlushReport {
    /// Time spent in the flush call itself
    pub elapsed: Duration,
    /// Milliseconds between logger creation and flush
    pub total_hrt: f64,
    /// Failing outcome when depth was not zero at flush
    pub depth_check: Outcome,
    pub failures: Vec<SinkFailure>,
}

impl FlushReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Depth returned to zero before the flush
    pub fn is_balanced(&self) -> bool {
        self.depth_check.ok
    }

    /// Balanced and every sink accepted the snapshot
    pub fn is_clean(&self) -> bool {
        self.is_balanced() && self.failures.is_empty()
    }
}

/// Buffers timestamped events for one unit of work and flushes them to
/// every persistent sink in the shared [`SinkRegistry`].
///
/// # Example
/// ```
/// use rust_profiling_logger::prelude::*;
///
/// let registry = SinkRegistry::builder().session("batch-1").build().unwrap();
/// let mut logger = Logger::new(&registry, "Worker");
///
/// logger.log("Importer", "run", Some(Outcome::failure(3, "bad row")));
/// assert!(logger.has_errors());
///
/// let report = logger.flush();
/// assert!(report.is_balanced());
/// ```
pub struct Logger {
    registry: Arc<SinkRegistry>,
    state: LoggerSnapshot,
    timestamp_format: TimestampFormat,
}

impl Logger {
    /// Create a logger in the registry's current session
    pub fn new(registry: &Arc<SinkRegistry>, name: impl Into<String>) -> Self {
        let id = registry.next_logger_id();
        Self {
            registry: Arc::clone(registry),
            state: LoggerSnapshot {
                id,
                session: registry.session(),
                name: name.into(),
                creation_time: Utc::now(),
                creation_hrt: hrt_now(),
                events: Vec::new(),
                depth: 0,
                has_errors: false,
                total_hrt: 0.0,
            },
            timestamp_format: registry.timestamp_format(),
        }
    }

    /// Append an event at the current depth.
    ///
    /// A failing `result` marks the logger as having errors. When a console
    /// sink is registered, events carrying a result are echoed immediately.
    pub fn log(
        &mut self,
        class_name: &str,
        method: &str,
        result: Option<Outcome>,
    ) -> &EventRecord {
        let event = EventRecord::new(
            self.state.depth,
            class_name,
            method,
            result,
            &self.timestamp_format,
        );

        if event.is_failure() {
            self.state.has_errors = true;
        }
        if event.result().is_some() {
            if let Some(console) = self.registry.sink(SinkKind::Console) {
                if let Err(e) = console.echo(&self.state.name, &event) {
                    eprintln!("[LOGGER ERROR] Console echo failed: {}", e);
                }
            }
        }

        self.registry.metrics().record_event();
        self.state.events.push(event);
        let last = self.state.events.len() - 1;
        &self.state.events[last]
    }

    /// Write the full logger state to every persistent sink, file first,
    /// then local store, then remote store.
    ///
    /// A failing sink does not stop the others. A non-zero depth is reported
    /// in [`FlushReport::depth_check`] after the writes have happened.
    pub fn flush(&mut self) -> FlushReport {
        let started = Instant::now();
        self.state.total_hrt = hrt_now() - self.state.creation_hrt;

        let mut failures = Vec::new();
        for sink in self.registry.persistent_sinks() {
            match Self::persist_isolated(sink.as_ref(), &self.state) {
                Ok(()) => {
                    self.registry.metrics().record_sink_write();
                }
                Err(message) => {
                    self.registry.metrics().record_sink_failure();
                    failures.push(SinkFailure {
                        kind: sink.kind(),
                        message,
                    });
                }
            }
        }

        self.registry.metrics().record_flush();

        let depth_check = self.check_depth();

        FlushReport {
            elapsed: started.elapsed(),
            total_hrt: self.state.total_hrt,
            depth_check,
            failures,
        }
    }

    /// Persist to one sink, turning errors and panics into a message
    fn persist_isolated(sink: &dyn Sink, snapshot: &LoggerSnapshot) -> Result<(), String> {
        let result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.persist(snapshot)));

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' ({}) failed: {}", sink.name(), sink.kind(), e);
                Err(e.to_string())
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' ({}) panicked: {}. \
                     Other sinks continue to function.",
                    sink.name(),
                    sink.kind(),
                    panic_msg
                );
                Err(format!("panicked: {}", panic_msg))
            }
        }
    }

    fn check_depth(&self) -> Outcome {
        if self.state.depth == 0 {
            return Outcome::success();
        }

        self.registry.metrics().record_depth_mismatch();
        let message = format!(
            "Logger ID=[{}] named [{}] was flushed at depth [{}] instead of zero: \
             begin/end profiling calls are mismatched",
            self.state.id, self.state.name, self.state.depth
        );
        eprintln!("[LOGGER WARNING] {}", message);
        Outcome::failure(codes::ASSERTION, message)
    }

    /// Spread in milliseconds between the first and last event, rounded to
    /// six significant digits. Zero with fewer than two events.
    pub fn elapsed_since_start(&self) -> f64 {
        match (self.state.events.first(), self.state.events.last()) {
            (Some(first), Some(last)) if self.state.events.len() > 1 => {
                round_to_significant(last.hrt() - first.hrt(), ELAPSED_SIGNIFICANT_DIGITS)
            }
            _ => 0.0,
        }
    }

    /// Open a nested profiling level
    pub fn enter(&mut self) {
        self.state.depth += 1;
    }

    /// Close a nested profiling level
    pub fn leave(&mut self) {
        self.state.depth -= 1;
    }

    pub fn set_depth(&mut self, depth: i64) {
        self.state.depth = depth;
    }

    /// Log an opening event and enter a level until the returned guard drops
    pub fn scope(&mut self, class_name: &str, method: &str) -> ProfileScope<'_> {
        ProfileScope::new(self, class_name, method)
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.state.id
    }

    #[inline]
    pub fn session(&self) -> &str {
        &self.state.session
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    #[inline]
    pub fn depth(&self) -> i64 {
        self.state.depth
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.state.has_errors
    }

    #[inline]
    pub fn events(&self) -> &[EventRecord] {
        &self.state.events
    }

    /// Milliseconds between creation and flush; zero before the first flush
    #[inline]
    pub fn total_hrt(&self) -> f64 {
        self.state.total_hrt
    }

    pub fn snapshot(&self) -> &LoggerSnapshot {
        &self.state
    }

    pub fn into_snapshot(self) -> LoggerSnapshot {
        self.state
    }

    pub fn registry(&self) -> &Arc<SinkRegistry> {
        &self.registry
    }
}
