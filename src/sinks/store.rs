//! Document-store sinks
//!
//! A store sink inserts one document per flush into a [`DocumentCollection`].
//! The collection is the seam to an actual database driver; two in-crate
//! implementations are provided for embedding and testing.

use crate::core::{Locality, LoggerSnapshot, RecorderError, Result, Sink, SinkKind};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A collection accepting single-document inserts
pub trait DocumentCollection: Send + Sync {
    fn name(&self) -> &str;

    fn insert_one(&self, document: serde_json::Value) -> Result<()>;
}

pub struct StoreSink {
    kind: SinkKind,
    collection: Arc<dyn DocumentCollection>,
}

impl StoreSink {
    pub fn new(collection: Arc<dyn DocumentCollection>, locality: Locality) -> Self {
        Self {
            kind: locality.sink_kind(),
            collection,
        }
    }

    pub fn collection(&self) -> &Arc<dyn DocumentCollection> {
        &self.collection
    }
}

impl Sink for StoreSink {
    fn kind(&self) -> SinkKind {
        self.kind
    }

    fn name(&self) -> &str {
        self.collection.name()
    }

    fn persist(&self, snapshot: &LoggerSnapshot) -> Result<()> {
        let document = snapshot.to_document()?;
        self.collection.insert_one(document)
    }
}

/// In-process collection keeping documents in insertion order
pub struct MemoryCollection {
    name: String,
    documents: Mutex<Vec<serde_json::Value>>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Mutex::new(Vec::new()),
        }
    }

    /// Copy of every inserted document
    pub fn documents(&self) -> Vec<serde_json::Value> {
        self.documents.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }
}

impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert_one(&self, document: serde_json::Value) -> Result<()> {
        self.documents.lock().push(document);
        Ok(())
    }
}

/// Collection stored as a JSON Lines file, one compact document per line
///
/// Compatible with log aggregation tools that ingest JSONL.
pub struct JsonLinesCollection {
    name: String,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesCollection {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                RecorderError::io_operation("opening collection", path.display().to_string(), e)
            })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("collection")
            .to_string();

        Ok(Self {
            name,
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every document stored in a JSON Lines file
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<serde_json::Value>> {
        let content = fs::read_to_string(path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(RecorderError::from))
            .collect()
    }
}

impl DocumentCollection for JsonLinesCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert_one(&self, document: serde_json::Value) -> Result<()> {
        let line = serde_json::to_string(&document)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}
