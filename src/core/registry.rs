//! Sink registry shared by all loggers of a process
//!
//! One [`SinkRegistry`] is created at start-up, wrapped in an `Arc` and handed
//! to every [`Logger`](super::Logger). It holds at most one sink per
//! [`SinkKind`], the active session name and the session counters.

use super::{
    error::Result,
    metrics::RecorderMetrics,
    sink::{Locality, Sink, SinkKind},
    timestamp::TimestampFormat,
};
use crate::sinks::{ConsoleSink, DocumentCollection, FileSink, StoreSink};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub struct SinkRegistry {
    sinks: RwLock<BTreeMap<SinkKind, Arc<dyn Sink>>>,
    session: RwLock<String>,
    /// Last logger id handed out in the current session
    last_id: AtomicU64,
    timestamp_format: RwLock<TimestampFormat>,
    metrics: RecorderMetrics,
}

impl SinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sinks: RwLock::new(BTreeMap::new()),
            session: RwLock::new(String::new()),
            last_id: AtomicU64::new(0),
            timestamp_format: RwLock::new(TimestampFormat::default()),
            metrics: RecorderMetrics::new(),
        }
    }

    /// Start a new session: rename it and reset the logger id and flush
    /// counters. Registered sinks are kept.
    pub fn set_session(&self, name: impl Into<String>) {
        *self.session.write() = name.into();
        self.last_id.store(0, Ordering::SeqCst);
        self.metrics.reset();
    }

    pub fn session(&self) -> String {
        self.session.read().clone()
    }

    /// Hand out the next logger id, starting at 1 in each session
    pub fn next_logger_id(&self) -> u64 {
        self.metrics.record_logger();
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of flushes completed in the current session
    pub fn flush_count(&self) -> u64 {
        self.metrics.flush_count()
    }

    pub fn metrics(&self) -> &RecorderMetrics {
        &self.metrics
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamp_format.read().clone()
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        *self.timestamp_format.write() = format;
    }

    /// Register a sink, replacing any sink of the same kind
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        let kind = sink.kind();
        if self.sinks.write().insert(kind, sink).is_some() {
            eprintln!("[LOGGER INFO] Replaced previously registered {} sink", kind);
        }
    }

    pub fn add_console_sink(&self) {
        self.add_sink(Arc::new(ConsoleSink::new()));
    }

    /// Register a file sink writing `file_name` inside `directory`.
    ///
    /// Returns the resolved file path, or the reason the directory cannot be
    /// used.
    pub fn try_add_file_sink(
        &self,
        directory: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<PathBuf> {
        let sink = FileSink::new(directory, file_name)?;
        let path = sink.path().to_path_buf();
        self.add_sink(Arc::new(sink));
        Ok(path)
    }

    /// Register a file sink, terminating the process if the directory cannot
    /// be written to.
    ///
    /// A log destination that cannot be written is a deployment error; use
    /// [`try_add_file_sink`](Self::try_add_file_sink) to handle it instead.
    pub fn add_file_sink(&self, directory: impl AsRef<Path>, file_name: &str) -> PathBuf {
        match self.try_add_file_sink(directory, file_name) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("[LOGGER CRITICAL] Cannot register file sink: {}", e);
                std::process::exit(1);
            }
        }
    }

    pub fn add_document_store_sink(
        &self,
        collection: Arc<dyn DocumentCollection>,
        locality: impl Into<Locality>,
    ) {
        self.add_sink(Arc::new(StoreSink::new(collection, locality.into())));
    }

    /// Remove every registered sink
    pub fn clear_sinks(&self) {
        self.sinks.write().clear();
    }

    pub fn has_sink(&self, kind: SinkKind) -> bool {
        self.sinks.read().contains_key(&kind)
    }

    pub fn sink(&self, kind: SinkKind) -> Option<Arc<dyn Sink>> {
        self.sinks.read().get(&kind).cloned()
    }

    /// Registered kinds in flush order
    pub fn kinds(&self) -> Vec<SinkKind> {
        self.sinks.read().keys().copied().collect()
    }

    /// Sinks written on flush, in flush order. The lock is released before
    /// the caller writes to them.
    pub(crate) fn persistent_sinks(&self) -> Vec<Arc<dyn Sink>> {
        self.sinks
            .read()
            .iter()
            .filter(|(kind, _)| kind.is_persistent())
            .map(|(_, sink)| Arc::clone(sink))
            .collect()
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a shared [`SinkRegistry`]
///
/// # Example
/// ```
/// use rust_profiling_logger::prelude::*;
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryCollection::new("loggers"));
/// let registry = SinkRegistry::builder()
///     .session("batch-1")
///     .console()
///     .store(store, Locality::Local)
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.session(), "batch-1");
/// ```
pub struct RegistryBuilder {
    session: String,
    console: bool,
    file: Option<(PathBuf, String)>,
    stores: Vec<(Arc<dyn DocumentCollection>, Locality)>,
    sinks: Vec<Arc<dyn Sink>>,
    timestamp_format: TimestampFormat,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            session: String::new(),
            console: false,
            file: None,
            stores: Vec::new(),
            sinks: Vec::new(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn session(mut self, name: impl Into<String>) -> Self {
        self.session = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console(mut self) -> Self {
        self.console = true;
        self
    }

    /// Add a file sink; the directory is checked by `build`
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        self.file = Some((directory.into(), file_name.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn store(mut self, collection: Arc<dyn DocumentCollection>, locality: Locality) -> Self {
        self.stores.push((collection, locality));
        self
    }

    /// Add a custom sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build the registry, failing if the file sink directory is unusable
    pub fn build(self) -> Result<Arc<SinkRegistry>> {
        let registry = SinkRegistry::new();
        registry.set_session(self.session);
        registry.set_timestamp_format(self.timestamp_format);

        if self.console {
            registry.add_console_sink();
        }
        if let Some((directory, file_name)) = self.file {
            registry.try_add_file_sink(directory, &file_name)?;
        }
        for (collection, locality) in self.stores {
            registry.add_document_store_sink(collection, locality);
        }
        for sink in self.sinks {
            registry.add_sink(sink);
        }

        Ok(Arc::new(registry))
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
