//! Logger metrics for observability
//!
//! Counters for lines written, calls filtered out, serialization fallbacks
//! and level file activity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use safe_json_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.suppressed_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines handed to the appender successfully
    lines_written: AtomicU64,

    /// Calls rejected by the level gate
    suppressed: AtomicU64,

    /// Calls whose root value was omitted by a transformer
    omitted: AtomicU64,

    /// Calls that fell back to the error marker line
    serialization_failures: AtomicU64,

    /// Lines the appender failed to write
    write_failures: AtomicU64,

    /// Successful level file reads
    level_reloads: AtomicU64,

    /// Failed level file reads
    level_read_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            omitted: AtomicU64::new(0),
            serialization_failures: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            level_reloads: AtomicU64::new(0),
            level_read_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn omitted_count(&self) -> u64 {
        self.omitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn serialization_failures(&self) -> u64 {
        self.serialization_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn level_reloads(&self) -> u64 {
        self.level_reloads.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn level_read_failures(&self) -> u64 {
        self.level_read_failures.load(Ordering::Relaxed)
    }

    /// Record a written line, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_omitted(&self) -> u64 {
        self.omitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_serialization_failure(&self) -> u64 {
        self.serialization_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_level_reload(&self) -> u64 {
        self.level_reloads.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_level_read_failure(&self) -> u64 {
        self.level_read_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.omitted.store(0, Ordering::Relaxed);
        self.serialization_failures.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.level_reloads.store(0, Ordering::Relaxed);
        self.level_read_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            lines_written: AtomicU64::new(self.lines_written()),
            suppressed: AtomicU64::new(self.suppressed_count()),
            omitted: AtomicU64::new(self.omitted_count()),
            serialization_failures: AtomicU64::new(self.serialization_failures()),
            write_failures: AtomicU64::new(self.write_failures()),
            level_reloads: AtomicU64::new(self.level_reloads()),
            level_read_failures: AtomicU64::new(self.level_read_failures()),
        }
    }
}
