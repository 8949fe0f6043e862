//! Appender trait for log output destinations

use super::error::Result;

/// Line-oriented output sink.
///
/// `line` already carries its delimiter; an appender writes it whole.
pub trait Appender: Send + Sync {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
