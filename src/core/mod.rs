//! Core logger types and traits

pub mod appender;
pub mod chain;
pub mod config;
pub mod envelope;
pub mod error;
pub mod level_source;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod serializer;
pub mod timestamp;
pub mod transformer;
pub mod value;

pub use appender::Appender;
pub use chain::{ChainSettings, Replacer, TransformerChain};
pub use config::{LoggerConfig, DEFAULT_ALWAYS_INCLUDE_KEYS};
pub use envelope::LogEnvelope;
pub use error::{LoggerError, Result};
pub use level_source::{ActiveLevel, LevelFile, LevelSource, DEFAULT_POLL_INTERVAL};
pub use log_level::LogLevel;
pub use logger::{CallArg, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use serializer::{CycleSafeSerializer, Indent, MAX_DEPTH};
pub use timestamp::TimestampFormat;
pub use transformer::{Field, FieldFn, FieldKind, FieldTransformer, Redaction};
pub use value::{LogValue, SharedArray, SharedObject};
