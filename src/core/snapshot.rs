//! Serializable logger state
//!
//! This is the shape written to every sink and read back by the session
//! service. Field names are camelCase for compatibility with existing files.

use super::event::EventRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerSnapshot {
    /// Position of the logger in its session, starting at 1
    pub id: u64,
    pub session: String,
    pub name: String,
    pub creation_time: DateTime<Utc>,
    pub creation_hrt: f64,
    pub events: Vec<EventRecord>,
    pub depth: i64,
    pub has_errors: bool,
    /// Milliseconds between creation and flush; zero until flushed
    pub total_hrt: f64,
}

impl LoggerSnapshot {
    /// Serialize to pretty JSON string (two-space indent)
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to a JSON document for store sinks
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Parse the legacy session file layout: snapshots separated by commas
    /// with no enclosing array.
    pub fn parse_session_text(raw: &str) -> Result<Vec<Self>, serde_json::Error> {
        let wrapped = format!("[{}]", raw);
        serde_json::from_str(&wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Outcome, TimestampFormat};

    fn sample(id: u64) -> LoggerSnapshot {
        LoggerSnapshot {
            id,
            session: "batch-1".to_string(),
            name: format!("Worker{}", id),
            creation_time: Utc::now(),
            creation_hrt: 12.5,
            events: vec![EventRecord::new(
                0,
                "Importer",
                "run",
                Some(Outcome::failure(4, "missing column")),
                &TimestampFormat::Stamp,
            )],
            depth: 0,
            has_errors: true,
            total_hrt: 3.25,
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = sample(1).to_json_pretty().unwrap();
        assert!(json.contains("\"creationTime\""));
        assert!(json.contains("\"hasErrors\": true"));
        assert!(json.contains("\"totalHrt\""));
        assert!(json.starts_with("{\n  \"id\": 1"));
    }

    #[test]
    fn test_parse_session_text() {
        let first = sample(1);
        let second = sample(2);
        let raw = format!(
            "{},\n{}",
            first.to_json_pretty().unwrap(),
            second.to_json_pretty().unwrap()
        );

        let parsed = LoggerSnapshot::parse_session_text(&raw).unwrap();
        assert_eq!(parsed, vec![first, second]);
    }

    #[test]
    fn test_null_payload_round_trips_through_session_text() {
        let mut snapshot = sample(3);
        snapshot.events.push(EventRecord::new(
            1,
            "Importer",
            "skip",
            Some(Outcome::ok_with("nothing to do").with_payload(serde_json::Value::Null)),
            &TimestampFormat::Stamp,
        ));

        let raw = snapshot.to_json_pretty().unwrap();
        let parsed = LoggerSnapshot::parse_session_text(&raw).unwrap();
        assert_eq!(parsed, vec![snapshot]);
    }

    #[test]
    fn test_parse_empty_session_text() {
        assert!(LoggerSnapshot::parse_session_text("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_session_text_fails() {
        assert!(LoggerSnapshot::parse_session_text("{\"id\": 1,,}").is_err());
    }
}
