//! Sink implementations

pub mod console;
pub mod file;
pub mod store;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use store::{DocumentCollection, JsonLinesCollection, MemoryCollection, StoreSink};

pub use crate::core::{Sink, SinkKind};
