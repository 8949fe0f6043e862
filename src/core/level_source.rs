//! Current level storage with optional file-based hot reload
//!
//! In polled mode a background thread re-reads a level file every interval.
//! The trimmed contents become the new level. Contents that name no level
//! still replace the current level and silence every call until a valid name
//! appears again. Read failures keep the previous level.

use super::error::{LoggerError, Result};
use super::log_level::{self, LogLevel};
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default level file poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Most recently observed level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveLevel {
    Known(LogLevel),
    /// Text that names no level; nothing is emitted while this is active
    Unrecognized(String),
}

impl ActiveLevel {
    /// Interpret raw level file contents
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<LogLevel>() {
            Ok(level) => ActiveLevel::Known(level),
            Err(_) => ActiveLevel::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn permits(&self, call: LogLevel) -> bool {
        match self {
            ActiveLevel::Known(current) => log_level::enabled(call, *current),
            ActiveLevel::Unrecognized(_) => false,
        }
    }

    pub fn known(&self) -> Option<LogLevel> {
        match self {
            ActiveLevel::Known(level) => Some(*level),
            ActiveLevel::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for ActiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveLevel::Known(level) => write!(f, "{}", level),
            ActiveLevel::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<LogLevel> for ActiveLevel {
    fn from(level: LogLevel) -> Self {
        ActiveLevel::Known(level)
    }
}

/// Where to poll the level from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFile {
    pub path: PathBuf,
    pub interval: Duration,
}

impl LevelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

struct Poller {
    stop: Sender<()>,
    handle: thread::JoinHandle<()>,
}

/// Shared current level, optionally refreshed from a [`LevelFile`]
pub struct LevelSource {
    current: Arc<RwLock<ActiveLevel>>,
    file: Option<LevelFile>,
    metrics: Arc<LoggerMetrics>,
    poller: Mutex<Option<Poller>>,
}

impl LevelSource {
    /// Static mode: the level changes only through [`LevelSource::set_level`]
    pub fn fixed(level: LogLevel) -> Self {
        Self::build(level, None, Arc::new(LoggerMetrics::new()))
    }

    /// Polled mode: starts the background reader immediately
    pub fn polled(level: LogLevel, file: LevelFile) -> Result<Self> {
        Self::polled_with_metrics(level, file, Arc::new(LoggerMetrics::new()))
    }

    pub(crate) fn polled_with_metrics(
        level: LogLevel,
        file: LevelFile,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        if file.interval.is_zero() {
            return Err(LoggerError::config(
                "LevelSource",
                "poll interval must be greater than zero",
            ));
        }
        let source = Self::build(level, Some(file), metrics);
        source.start()?;
        Ok(source)
    }

    pub(crate) fn fixed_with_metrics(level: LogLevel, metrics: Arc<LoggerMetrics>) -> Self {
        Self::build(level, None, metrics)
    }

    fn build(level: LogLevel, file: Option<LevelFile>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            current: Arc::new(RwLock::new(ActiveLevel::Known(level))),
            file,
            metrics,
            poller: Mutex::new(None),
        }
    }

    fn start(&self) -> Result<()> {
        let Some(file) = self.file.clone() else {
            return Ok(());
        };
        let (stop, stopped) = bounded::<()>(1);
        let current = Arc::clone(&self.current);
        let metrics = Arc::clone(&self.metrics);

        let handle = thread::Builder::new()
            .name("level-file-poll".to_string())
            .spawn(move || loop {
                match stopped.recv_timeout(file.interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        // Failures keep the previous level
                        let _ = read_into(&file.path, &current, &metrics);
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| LoggerError::io_operation("spawning level poller", e.to_string(), e))?;

        *self.poller.lock() = Some(Poller { stop, handle });
        Ok(())
    }

    pub fn current(&self) -> ActiveLevel {
        self.current.read().clone()
    }

    pub fn is_enabled(&self, call: LogLevel) -> bool {
        self.current.read().permits(call)
    }

    /// Explicitly replace the current level in either mode
    pub fn set_level(&self, level: impl Into<ActiveLevel>) {
        *self.current.write() = level.into();
    }

    pub fn level_file(&self) -> Option<&LevelFile> {
        self.file.as_ref()
    }

    /// Read the level file once, now.
    ///
    /// Returns the level that is active afterwards. In static mode this is a
    /// no-op returning the current level.
    pub fn refresh(&self) -> Result<ActiveLevel> {
        match &self.file {
            Some(file) => read_into(&file.path, &self.current, &self.metrics),
            None => Ok(self.current()),
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.lock().is_some()
    }

    /// Stop the background reader. Safe to call more than once.
    pub fn stop(&self) {
        if let Some(poller) = self.poller.lock().take() {
            let _ = poller.stop.send(());
            if poller.handle.join().is_err() {
                eprintln!("[LOGGER ERROR] Level poller thread panicked");
            }
        }
    }
}

fn read_into(
    path: &Path,
    current: &RwLock<ActiveLevel>,
    metrics: &LoggerMetrics,
) -> Result<ActiveLevel> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let level = ActiveLevel::parse(&contents);
            *current.write() = level.clone();
            metrics.record_level_reload();
            Ok(level)
        }
        Err(e) => {
            metrics.record_level_read_failure();
            Err(LoggerError::level_file(path.display().to_string(), e.to_string()))
        }
    }
}

impl Drop for LevelSource {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for LevelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelSource")
            .field("current", &self.current())
            .field("file", &self.file)
            .field("polling", &self.is_polling())
            .finish()
    }
}
