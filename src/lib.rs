//! # Safe JSON Logger
//!
//! A structured logger that writes one JSON object per line.
//!
//! ## Features
//!
//! - **Cycle Safe**: Payloads may reference themselves; cycles render as
//!   `[Circular ~.path]` markers instead of recursing forever
//! - **Field Control**: Include/exclude key lists, custom replacers and
//!   value redaction, composed into one ordered chain per call
//! - **Error Normalization**: Error-shaped values always render as
//!   `{name, message, stack}`
//! - **Hot Reload**: The active level can be polled from a text file
//!
//! ```
//! use safe_json_logger::prelude::*;
//! use serde_json::json;
//!
//! let sink = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .level(LogLevel::Debug)
//!     .appender(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! logger.info(json!({"a": 1, "b": 2}));
//! logger.trace(json!("below the threshold"));
//!
//! assert_eq!(sink.lines().len(), 1);
//! assert!(sink.contents().contains(r#""level":"info","log":{"a":1,"b":2}"#));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

#[doc(hidden)]
pub use serde_json as __serde_json;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender};
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::core::{
        ActiveLevel, Appender, CallArg, Field, FieldKind, FieldTransformer, Indent, LevelFile,
        LevelSource, LogLevel, LogValue, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Redaction, Replacer, Result, SharedArray, SharedObject, TimestampFormat,
        TransformerChain,
    };
}

#[cfg(feature = "file")]
pub use appenders::FileAppender;
pub use appenders::{ConsoleAppender, MemoryAppender};
pub use core::{
    ActiveLevel, Appender, CallArg, ChainSettings, CycleSafeSerializer, Field, FieldFn, FieldKind,
    FieldTransformer, Indent, LevelFile, LevelSource, LogEnvelope, LogLevel, LogValue, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Redaction, Replacer, Result,
    SharedArray, SharedObject, TimestampFormat, TransformerChain, DEFAULT_ALWAYS_INCLUDE_KEYS,
    DEFAULT_POLL_INTERVAL,
};
