//! Sink trait for flushed logger snapshots

use super::{error::Result, event::EventRecord, snapshot::LoggerSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of output destinations.
///
/// The declaration order is the flush order: persistent kinds are written
/// file first, then local store, then remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkKind {
    Console,
    File,
    LocalStore,
    RemoteStore,
}

impl SinkKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::File => "file",
            SinkKind::LocalStore => "local-store",
            SinkKind::RemoteStore => "remote-store",
        }
    }

    /// Whether flush writes snapshots to this kind. Console sinks only echo.
    #[inline]
    pub fn is_persistent(&self) -> bool {
        !matches!(self, SinkKind::Console)
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Where a document store lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locality {
    Local,
    Remote,
}

impl Locality {
    pub fn sink_kind(&self) -> SinkKind {
        match self {
            Locality::Local => SinkKind::LocalStore,
            Locality::Remote => SinkKind::RemoteStore,
        }
    }
}

impl From<bool> for Locality {
    /// `true` maps to [`Locality::Local`]
    fn from(is_local: bool) -> Self {
        if is_local {
            Locality::Local
        } else {
            Locality::Remote
        }
    }
}

pub trait Sink: Send + Sync {
    fn kind(&self) -> SinkKind;

    fn name(&self) -> &str;

    /// Write one full logger snapshot
    fn persist(&self, snapshot: &LoggerSnapshot) -> Result<()>;

    /// Live echo of an event as it is logged
    fn echo(&self, _logger_name: &str, _event: &EventRecord) -> Result<()> {
        Ok(())
    }
}
