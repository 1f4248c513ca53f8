//! Core recorder types and traits

pub mod clock;
pub mod error;
pub mod event;
pub mod logger;
pub mod metrics;
pub mod outcome;
pub mod registry;
pub mod scope;
pub mod sink;
pub mod snapshot;
pub mod timestamp;

pub use clock::{hrt_now, round_to_significant};
pub use error::{RecorderError, Result};
pub use event::EventRecord;
pub use logger::{FlushReport, Logger, SinkFailure, ELAPSED_SIGNIFICANT_DIGITS};
pub use metrics::RecorderMetrics;
pub use outcome::{codes, Outcome};
pub use registry::{RegistryBuilder, SinkRegistry};
pub use scope::ProfileScope;
pub use sink::{Locality, Sink, SinkKind};
pub use snapshot::LoggerSnapshot;
pub use timestamp::TimestampFormat;
