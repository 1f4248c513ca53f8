//! Event record structure

use super::clock::hrt_now;
use super::outcome::Outcome;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// One buffered occurrence inside a [`Logger`](super::Logger).
///
/// Fields are private: a record cannot change once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    depth: i64,
    class_name: String,
    method: String,
    #[serde(rename = "dateTimeStamp")]
    timestamp: String,
    hrt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<Outcome>,
}

impl EventRecord {
    pub fn new(
        depth: i64,
        class_name: impl Into<String>,
        method: impl Into<String>,
        result: Option<Outcome>,
        format: &TimestampFormat,
    ) -> Self {
        Self {
            depth,
            class_name: class_name.into(),
            method: method.into(),
            timestamp: format.now(),
            hrt: hrt_now(),
            result,
        }
    }

    #[inline]
    pub fn depth(&self) -> i64 {
        self.depth
    }

    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Wall-clock stamp taken at construction
    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Monotonic sample in milliseconds, see [`hrt_now`]
    #[inline]
    pub fn hrt(&self) -> f64 {
        self.hrt
    }

    #[inline]
    pub fn result(&self) -> Option<&Outcome> {
        self.result.as_ref()
    }

    /// True when a result is attached and reports failure
    pub fn is_failure(&self) -> bool {
        self.result.as_ref().is_some_and(|r| !r.ok)
    }
}
