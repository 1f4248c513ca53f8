//! Structured result attached to events and returned by managed checks

use super::error::RecorderError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Error codes used by the engine's own managed reports
pub mod codes {
    /// No error
    pub const NONE: i32 = 0;
    /// A runtime assertion did not hold (e.g. depth mismatch at flush)
    pub const ASSERTION: i32 = 1;
}

/// Outcome of an operation: an ok flag, an error code, a message and an
/// optional JSON payload.
///
/// Loggers read only the `ok` flag; everything else is carried verbatim into
/// the persisted snapshot and the console echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub ok: bool,
    #[serde(default)]
    pub error: i32,
    #[serde(default)]
    pub message: String,
    /// `None` is omitted from JSON; `Some(Value::Null)` is written as `null`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_payload"
    )]
    pub payload: Option<serde_json::Value>,
}

/// A present `payload` key, `null` included, reads back as `Some`
fn present_payload<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl Outcome {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: codes::NONE,
            message: String::new(),
            payload: None,
        }
    }

    /// Successful outcome with a message
    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::success()
        }
    }

    pub fn failure(error: i32, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error,
            message: message.into(),
            payload: None,
        }
    }

    /// Attach a structured payload
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(code:{}) message: {}", self.error, self.message)
    }
}

impl From<&RecorderError> for Outcome {
    fn from(err: &RecorderError) -> Self {
        Outcome::failure(err.code(), err.to_string())
    }
}

impl From<RecorderError> for Outcome {
    fn from(err: RecorderError) -> Self {
        Outcome::from(&err)
    }
}
