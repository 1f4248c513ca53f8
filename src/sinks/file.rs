//! File sink implementation
//!
//! Session files hold pretty-printed logger snapshots separated by `,\n`
//! without an enclosing array. Wrapping the whole file in `[` `]` yields a
//! valid JSON array; see [`LoggerSnapshot::parse_session_text`].

use crate::core::{LoggerSnapshot, RecorderError, Result, Sink, SinkKind};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

const SEPARATOR: &str = ",\n";

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Resolve `directory`, check it can be written to and target `file_name`
    /// inside it.
    ///
    /// `file_name` must be a single plain name. The target is opened for
    /// append once so an unwritable destination fails here, not at flush.
    pub fn new(directory: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        if file_name.trim().is_empty() {
            return Err(RecorderError::config("FileSink", "file name is empty"));
        }
        if !is_plain_file_name(file_name) {
            return Err(RecorderError::config(
                "FileSink",
                format!("file name must not contain path components: {}", file_name),
            ));
        }
        let directory = resolve_writable_dir(directory.as_ref())?;
        let path = directory.join(file_name);
        check_appendable(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one fragment, prefixing the separator unless the file is empty.
    ///
    /// The length check and the write happen under an exclusive lock so
    /// concurrent flushes to the same file stay well formed.
    fn append_fragment(&self, fragment: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                RecorderError::io_operation(
                    "opening session file",
                    self.path.display().to_string(),
                    e,
                )
            })?;

        lock(&file)?;
        let written = Self::write_locked(&mut file, fragment);
        let unlocked = unlock(&file);

        written.map_err(|e| {
            RecorderError::io_operation(
                "appending logger snapshot",
                self.path.display().to_string(),
                e,
            )
        })?;
        unlocked?;
        Ok(())
    }

    fn write_locked(file: &mut File, fragment: &str) -> std::io::Result<()> {
        let separator = if file.metadata()?.len() == 0 { "" } else { SEPARATOR };
        let mut text = String::with_capacity(separator.len() + fragment.len());
        text.push_str(separator);
        text.push_str(fragment);
        file.write_all(text.as_bytes())?;
        file.flush()
    }
}

impl Sink for FileSink {
    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn name(&self) -> &str {
        "file"
    }

    fn persist(&self, snapshot: &LoggerSnapshot) -> Result<()> {
        let json = snapshot.to_json_pretty()?;
        self.append_fragment(&json)
    }
}

fn is_plain_file_name(file_name: &str) -> bool {
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Canonicalize `directory` and verify it is an existing, writable directory
pub(crate) fn resolve_writable_dir(directory: &Path) -> Result<PathBuf> {
    let display = directory.display().to_string();
    let resolved = fs::canonicalize(directory).map_err(|e| {
        RecorderError::permission(&display, format!("cannot resolve directory: {}", e))
    })?;

    let metadata = fs::metadata(&resolved).map_err(|e| {
        RecorderError::permission(&display, format!("cannot stat directory: {}", e))
    })?;

    if !metadata.is_dir() {
        return Err(RecorderError::permission(&display, "not a directory"));
    }
    if metadata.permissions().readonly() {
        return Err(RecorderError::permission(&display, "directory is read-only"));
    }
    Ok(resolved)
}

/// Open `path` for append, leaving no trace if it did not exist before
fn check_appendable(path: &Path) -> Result<()> {
    let existed = path.exists();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            RecorderError::permission(
                path.display().to_string(),
                format!("cannot open for append: {}", e),
            )
        })?;
    if !existed {
        // An empty leftover would still parse as an empty session.
        let _ = fs::remove_file(path);
    }
    Ok(())
}

#[cfg(feature = "file")]
fn lock(file: &File) -> Result<()> {
    fs2::FileExt::lock_exclusive(file)
        .map_err(|e| RecorderError::io_operation("locking session file", "exclusive lock", e))
}

#[cfg(feature = "file")]
fn unlock(file: &File) -> Result<()> {
    fs2::FileExt::unlock(file)
        .map_err(|e| RecorderError::io_operation("unlocking session file", "exclusive lock", e))
}

#[cfg(not(feature = "file"))]
fn lock(_file: &File) -> Result<()> {
    Ok(())
}

#[cfg(not(feature = "file"))]
fn unlock(_file: &File) -> Result<()> {
    Ok(())
}
