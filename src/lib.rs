//! # Rust Profiling Logger
//!
//! An embeddable event and profiling recorder. Application code opens a
//! [`Logger`] per unit of work, appends timestamped events to it and flushes
//! the buffered state to the sinks registered in a shared [`SinkRegistry`].
//! Flushed file sessions are read back and pruned with
//! [`SessionFileService`].
//!
//! ## Features
//!
//! - **Buffered loggers**: ordered events with nesting depth and error tracking
//! - **Multiple sinks**: console echo, append-only session files, document stores
//! - **Session files**: listing, reloading and retention pruning
//! - **Sink isolation**: a failing sink never prevents writes to the others

pub mod core;
pub mod macros;
pub mod sessions;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        codes, EventRecord, FlushReport, Locality, Logger, LoggerSnapshot, Outcome, ProfileScope,
        RecorderError, RecorderMetrics, RegistryBuilder, Result, Sink, SinkFailure, SinkKind,
        SinkRegistry, TimestampFormat,
    };
    pub use crate::sessions::{SessionFileService, SessionStore};
    pub use crate::sinks::{
        ConsoleSink, DocumentCollection, FileSink, JsonLinesCollection, MemoryCollection,
        StoreSink,
    };
}

pub use crate::core::{
    codes, EventRecord, FlushReport, Locality, Logger, LoggerSnapshot, Outcome, ProfileScope,
    RecorderError, RecorderMetrics, RegistryBuilder, Result, Sink, SinkFailure, SinkKind,
    SinkRegistry, TimestampFormat,
};
pub use sessions::{SessionFileService, SessionStore};
pub use sinks::{
    ConsoleSink, DocumentCollection, FileSink, JsonLinesCollection, MemoryCollection, StoreSink,
};
