//! Console sink implementation

use crate::core::{EventRecord, LoggerSnapshot, Result, Sink, SinkKind};
#[cfg(feature = "console")]
use colored::Colorize;

/// Echoes events with an attached result to stdout as they are logged.
///
/// Output per event:
///
/// ```text
/// Worker => Importer.run:
///     (code:3) message: bad row
///     { "row": 12 }
/// ```
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render the echo block for an event, or `None` when it has no result
    pub fn render(&self, logger_name: &str, event: &EventRecord) -> Option<String> {
        let result = event.result()?;

        let header = format!("{} => {}.{}:", logger_name, event.class_name(), event.method());
        let mut output = self.paint_header(header, !result.ok);
        output.push('\n');
        output.push_str(&format!("    {}", result));

        if let Some(ref payload) = result.payload {
            let pretty = serde_json::to_string_pretty(payload)
                .unwrap_or_else(|_| payload.to_string());
            for line in pretty.lines() {
                output.push_str("\n    ");
                output.push_str(line);
            }
        }

        Some(output)
    }

    #[cfg(feature = "console")]
    fn paint_header(&self, header: String, failed: bool) -> String {
        if !self.use_colors {
            return header;
        }
        if failed {
            header.red().bold().to_string()
        } else {
            header.cyan().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint_header(&self, header: String, _failed: bool) -> String {
        header
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn name(&self) -> &str {
        "console"
    }

    fn persist(&self, _snapshot: &LoggerSnapshot) -> Result<()> {
        Ok(())
    }

    fn echo(&self, logger_name: &str, event: &EventRecord) -> Result<()> {
        if let Some(output) = self.render(logger_name, event) {
            println!("{}", output);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Outcome, TimestampFormat};
    use serde_json::json;

    fn event(result: Option<Outcome>) -> EventRecord {
        EventRecord::new(0, "Importer", "run", result, &TimestampFormat::Stamp)
    }

    #[test]
    fn test_render_without_result() {
        let sink = ConsoleSink::with_colors(false);
        assert!(sink.render("Worker", &event(None)).is_none());
    }

    #[test]
    fn test_render_failure() {
        let sink = ConsoleSink::with_colors(false);
        let output = sink
            .render("Worker", &event(Some(Outcome::failure(3, "bad row"))))
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Worker => Importer.run:");
        assert_eq!(lines[1], "    (code:3) message: bad row");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_render_payload_is_indented() {
        let sink = ConsoleSink::with_colors(false);
        let outcome = Outcome::ok_with("imported").with_payload(json!({ "rows": 12 }));
        let output = sink.render("Worker", &event(Some(outcome))).unwrap();
        assert!(output.contains("    \"rows\": 12"));
        assert!(output.lines().skip(2).all(|l| l.starts_with("    ")));
    }

    #[test]
    fn test_console_is_not_persistent() {
        let sink = ConsoleSink::new();
        assert_eq!(sink.kind(), SinkKind::Console);
        assert!(!sink.kind().is_persistent());
    }
}
