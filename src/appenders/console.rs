//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::Write;

/// Writes lines to standard output.
///
/// Each line goes out in one `write_all` under the stdout lock, so lines from
/// concurrent loggers never interleave.
pub struct ConsoleAppender {
    flush_each_line: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            flush_each_line: false,
        }
    }

    /// Flush stdout after every line
    ///
    /// # Example
    ///
    /// ```
    /// use safe_json_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::new().with_flush_each_line(true);
    /// ```
    #[must_use]
    pub fn with_flush_each_line(mut self, flush: bool) -> Self {
        self.flush_each_line = flush;
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        if self.flush_each_line {
            stdout.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
