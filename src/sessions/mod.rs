//! Reading back and pruning persisted sessions
//!
//! [`SessionStore`] is the capability set any persisted-session backend
//! offers; [`SessionFileService`] implements it over the session files
//! written by [`FileSink`](crate::sinks::FileSink).

pub mod fs;

pub use self::fs::SessionFileService;

use crate::core::{LoggerSnapshot, Result};

pub trait SessionStore {
    /// Re-read the session list, most recent first, replacing the cache
    fn load_sessions(&mut self) -> Result<&[String]>;

    /// Load the session list only if the cache is empty
    fn ensure_loaded(&mut self) -> Result<()> {
        if self.sessions().is_empty() {
            self.load_sessions()?;
        }
        Ok(())
    }

    /// Cached session list, most recent first
    fn sessions(&self) -> &[String];

    fn is_ready(&self) -> bool {
        !self.sessions().is_empty()
    }

    /// Every logger snapshot stored in the session at `index` of the cached list
    fn load_loggers_from_session_index(&mut self, index: usize) -> Result<Vec<LoggerSnapshot>>;

    /// Delete all but the `keep_last` most recent sessions, returning how many
    /// were removed
    fn purge_old_sessions(&mut self, keep_last: usize) -> Result<usize>;
}
