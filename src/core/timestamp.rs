//! Wall-clock stamps for event records
//!
//! Every [`EventRecord`](super::EventRecord) carries a human-sortable wall-clock
//! stamp next to its monotonic `hrt` sample. The stamp layout is configurable
//! per registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layouts for event stamps
///
/// Every variant sorts lexicographically in chronological order, except
/// `Custom`, which is as sortable as the pattern it is given.
///
/// # Examples
///
/// ```
/// use rust_profiling_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let stamp = TimestampFormat::Stamp.format(&Utc::now());
/// assert_eq!(stamp.len(), "2025/01/08 10:30:45.123".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025/01/08 10:30:45.123`
    #[default]
    Stamp,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    ///
    /// Useful when many events land within the same millisecond.
    Iso8601Micros,

    /// Zero-padded Unix milliseconds: `0001736332245123`
    UnixMillis,

    /// Custom strftime pattern
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Stamp => datetime.format("%Y/%m/%d %H:%M:%S%.3f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::UnixMillis => format!("{:016}", datetime.timestamp_millis()),
            TimestampFormat::Custom(pattern) => datetime.format(pattern).to_string(),
        }
    }

    /// Stamp the current instant
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }
}
