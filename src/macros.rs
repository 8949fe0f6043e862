//! Logging macros taking a JSON payload literal.
//!
//! The payload uses `serde_json::json!` syntax, so callers do not need to
//! build a [`LogValue`](crate::LogValue) by hand.
//!
//! # Examples
//!
//! ```
//! use safe_json_logger::prelude::*;
//! use safe_json_logger::info;
//!
//! let sink = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .level(LogLevel::Info)
//!     .appender(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! let port = 8080;
//! info!(logger, {"event": "listening", "port": port});
//! assert!(sink.contents().contains(r#""port":8080"#));
//! ```

/// Log a JSON payload at the given level.
///
/// # Examples
///
/// ```
/// # use safe_json_logger::prelude::*;
/// # let logger = Logger::builder().appender(MemoryAppender::new()).build().unwrap();
/// use safe_json_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, {"code": 500});
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($json:tt)+) => {
        $logger.log($level, $crate::__serde_json::json!($($json)+))
    };
}

/// Log a trace-level payload.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($json:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($json)+)
    };
}

/// Log a debug-level payload.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($json:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($json)+)
    };
}

/// Log an info-level payload.
///
/// # Examples
///
/// ```
/// # use safe_json_logger::prelude::*;
/// # let logger = Logger::builder().appender(MemoryAppender::new()).build().unwrap();
/// use safe_json_logger::info;
/// info!(logger, {"items": 100, "queue": "ingest"});
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($json:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($json)+)
    };
}

/// Log a warning-level payload.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($json:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($json)+)
    };
}

/// Log an error-level payload.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($json:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($json)+)
    };
}

/// Log a fatal-level payload.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($json:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($json)+)
    };
}
