//! Filesystem-backed session service

use super::SessionStore;
use crate::core::{LoggerSnapshot, RecorderError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default extension of session files
pub const DEFAULT_EXTENSION: &str = "log";

/// Lists, reloads and prunes session files in one data folder.
///
/// Session names must sort so that descending order is most recent first,
/// e.g. a leading `%Y%m%d-%H%M%S` stamp.
///
/// # Example
/// ```no_run
/// use rust_profiling_logger::prelude::*;
///
/// let mut service = SessionFileService::new("./logs");
/// service.load_sessions()?;
/// let loggers = service.load_loggers_from_session_index(0)?;
/// println!("{} loggers in the latest session", loggers.len());
/// service.purge_old_sessions(10)?;
/// # Ok::<(), RecorderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SessionFileService {
    data_folder: PathBuf,
    extension: String,
    sessions: Vec<String>,
}

impl SessionFileService {
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        Self {
            data_folder: data_folder.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            sessions: Vec::new(),
        }
    }

    /// Only files with this extension are sessions. A leading dot is ignored.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the cached session at `index`
    pub fn session_path(&self, index: usize) -> Result<PathBuf> {
        let name = self
            .sessions
            .get(index)
            .ok_or(RecorderError::SessionIndexOutOfRange {
                index,
                len: self.sessions.len(),
            })?;
        Ok(self.data_folder.join(name))
    }

    fn read_session_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.data_folder).map_err(|e| {
            RecorderError::io_operation(
                "listing session files",
                self.data_folder.display().to_string(),
                e,
            )
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if !matches {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    fn remove_sessions_beyond(&mut self, keep_last: usize) -> Result<usize> {
        let mut removed = 0;
        while self.sessions.len() > keep_last {
            let path = self.session_path(self.sessions.len() - 1)?;
            fs::remove_file(&path).map_err(|e| {
                RecorderError::io_operation("deleting session file", path.display().to_string(), e)
            })?;
            eprintln!("[LOGGER INFO] Deleted session file: {}", path.display());
            self.sessions.pop();
            removed += 1;
        }
        Ok(removed)
    }
}

impl SessionStore for SessionFileService {
    fn load_sessions(&mut self) -> Result<&[String]> {
        self.sessions = self.read_session_names()?;
        Ok(self.sessions.as_slice())
    }

    fn sessions(&self) -> &[String] {
        &self.sessions
    }

    fn load_loggers_from_session_index(&mut self, index: usize) -> Result<Vec<LoggerSnapshot>> {
        self.ensure_loaded()?;

        let path = self.session_path(index)?;
        if !path.is_file() {
            return Err(RecorderError::session_missing(path.display().to_string()));
        }

        let raw = fs::read_to_string(&path).map_err(|e| {
            RecorderError::io_operation("reading session file", path.display().to_string(), e)
        })?;

        // A malformed file is a bug in whatever wrote it: no lenient fallback.
        let loggers = LoggerSnapshot::parse_session_text(&raw)?;
        Ok(loggers)
    }

    fn purge_old_sessions(&mut self, keep_last: usize) -> Result<usize> {
        self.ensure_loaded()?;

        self.remove_sessions_beyond(keep_last).map_err(|e| {
            RecorderError::unmanaged(format!("Error purging old session files: {}", e))
        })
    }
}
