//! Error types for the recorder

pub type Result<T> = std::result::Result<T, RecorderError>;

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A sink directory cannot be written to
    #[error("Write permission denied for '{path}': {message}")]
    PermissionDenied { path: String, message: String },

    /// A session file listed in the cache is gone from disk
    #[error("Session file '{path}' does not exist")]
    SessionFileMissing { path: String },

    /// Session index outside the cached session list
    #[error("Session index {index} out of range ({len} sessions loaded)")]
    SessionIndexOutOfRange { index: usize, len: usize },

    /// Failure caught at a service boundary and rewrapped
    #[error("Unmanaged error: {0}")]
    Unmanaged(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl RecorderError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        RecorderError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a write permission error
    pub fn permission(path: impl Into<String>, message: impl Into<String>) -> Self {
        RecorderError::PermissionDenied {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn session_missing(path: impl Into<String>) -> Self {
        RecorderError::SessionFileMissing { path: path.into() }
    }

    pub fn unmanaged<S: Into<String>>(msg: S) -> Self {
        RecorderError::Unmanaged(msg.into())
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        RecorderError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RecorderError::Other(msg.into())
    }

    /// Stable numeric code carried into a failing [`Outcome`](super::Outcome)
    pub fn code(&self) -> i32 {
        match self {
            RecorderError::IoOperation { .. } | RecorderError::IoError(_) => 10,
            RecorderError::JsonError(_) => 11,
            RecorderError::PermissionDenied { .. } => 20,
            RecorderError::SessionFileMissing { .. } => 30,
            RecorderError::SessionIndexOutOfRange { .. } => 31,
            RecorderError::Unmanaged(_) => 90,
            RecorderError::InvalidConfiguration { .. } => 91,
            RecorderError::Other(_) => 99,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RecorderError::permission("/var/log", "read-only");
        assert!(matches!(err, RecorderError::PermissionDenied { .. }));

        let err = RecorderError::config("SinkRegistry", "empty file name");
        assert!(matches!(err, RecorderError::InvalidConfiguration { .. }));

        let err = RecorderError::session_missing("/data/logs/a.log");
        assert!(matches!(err, RecorderError::SessionFileMissing { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = RecorderError::SessionIndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Session index 4 out of range (2 sessions loaded)"
        );

        let err = RecorderError::unmanaged("Error purging old session files: busy");
        assert_eq!(
            err.to_string(),
            "Unmanaged error: Error purging old session files: busy"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = RecorderError::io_operation("appending snapshot", "cannot write to file", io_err);

        assert!(matches!(err, RecorderError::IoOperation { .. }));
        assert!(err.to_string().contains("appending snapshot"));
        assert!(err.to_string().contains("cannot write to file"));
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn test_codes_are_distinct_per_family() {
        let missing = RecorderError::session_missing("x");
        let range = RecorderError::SessionIndexOutOfRange { index: 0, len: 0 };
        assert_ne!(missing.code(), range.code());
        assert_eq!(RecorderError::unmanaged("boom").code(), 90);
    }
}
