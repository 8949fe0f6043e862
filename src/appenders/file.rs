//! File appender implementation
//!
//! Appends JSON lines to a file. Every line is written under an exclusive
//! advisory lock so several processes can share one log file without
//! interleaving partial lines.

use crate::core::{Appender, LoggerError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileAppender {
    file: Option<File>,
    path: PathBuf,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use safe_json_logger::appenders::FileAppender;
    ///
    /// let appender = FileAppender::new("/var/log/app.jsonl").unwrap();
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    format!("opening '{}'", path.display()),
                    e.to_string(),
                    e,
                )
            })?;

        Ok(Self {
            file: Some(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::other("File appender already closed"))?;

        file.lock_exclusive()
            .map_err(|_| LoggerError::file_lock(self.path.display().to_string()))?;
        let written = file.write_all(line.as_bytes());
        let unlocked = file.unlock();
        written?;
        unlocked?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
        self.file = None;
    }
}
