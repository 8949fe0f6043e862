//! Main logger implementation

use super::{
    appender::Appender,
    chain::{ChainSettings, Replacer, TransformerChain},
    config::LoggerConfig,
    envelope::LogEnvelope,
    error::{LoggerError, Result},
    level_source::{ActiveLevel, LevelSource},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    serializer::{self, CycleSafeSerializer, Indent},
    timestamp::TimestampFormat,
    transformer::{Field, FieldFn, Redaction},
    value::LogValue,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Second positional argument of a log call.
///
/// Strings and integers select an indent; anything else is a replacer
/// override. A string is always the verbatim indent unit, even `"4"`. A key
/// list whose comma-joined text starts with an integer (`["2"]`,
/// `["10", "name"]`) is read as an indent too. That ambiguity is kept so
/// existing call sites behave the same.
#[derive(Clone, Default)]
pub enum CallArg {
    #[default]
    None,
    Text(String),
    Int(i64),
    Keys(Vec<String>),
    Function(FieldFn),
}

impl CallArg {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Field<'_>, LogValue) -> Option<LogValue> + Send + Sync + 'static,
    {
        CallArg::Function(Arc::new(f))
    }

    /// Split into the replacer override and the indent override it carries
    pub fn classify(self) -> (Option<Replacer>, Option<Indent>) {
        match self {
            CallArg::None => (None, None),
            CallArg::Text(s) => (None, Some(Indent::Text(s))),
            CallArg::Int(n) => (None, Some(Indent::Spaces(n.max(0) as u64))),
            CallArg::Keys(keys) => match parse_int_prefix(&keys.join(",")) {
                Some(n) => (None, Some(Indent::Spaces(n.max(0) as u64))),
                None => (Some(Replacer::Keys(keys)), None),
            },
            CallArg::Function(f) => (Some(Replacer::Function(f)), None),
        }
    }
}

/// Leading-integer parse: optional whitespace, sign, then at least one digit
fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Debug for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallArg::None => write!(f, "None"),
            CallArg::Text(s) => f.debug_tuple("Text").field(s).finish(),
            CallArg::Int(n) => f.debug_tuple("Int").field(n).finish(),
            CallArg::Keys(k) => f.debug_tuple("Keys").field(k).finish(),
            CallArg::Function(_) => write!(f, "Function(..)"),
        }
    }
}

impl From<&str> for CallArg {
    fn from(s: &str) -> Self {
        CallArg::Text(s.to_string())
    }
}

impl From<String> for CallArg {
    fn from(s: String) -> Self {
        CallArg::Text(s)
    }
}

macro_rules! impl_call_arg_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CallArg {
                fn from(n: $t) -> Self {
                    CallArg::Int(i64::try_from(n).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_call_arg_int!(i32, i64, u8, u32, u64, usize);

impl From<Vec<String>> for CallArg {
    fn from(keys: Vec<String>) -> Self {
        CallArg::Keys(keys)
    }
}

impl From<Vec<&str>> for CallArg {
    fn from(keys: Vec<&str>) -> Self {
        CallArg::Keys(keys.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CallArg {
    fn from(keys: [&str; N]) -> Self {
        CallArg::Keys(keys.into_iter().map(String::from).collect())
    }
}

impl From<Replacer> for CallArg {
    fn from(replacer: Replacer) -> Self {
        match replacer {
            Replacer::Function(f) => CallArg::Function(f),
            Replacer::Keys(keys) => CallArg::Keys(keys),
        }
    }
}

impl<T: Into<CallArg>> From<Option<T>> for CallArg {
    fn from(arg: Option<T>) -> Self {
        arg.map(Into::into).unwrap_or_default()
    }
}

pub struct Logger {
    level: LevelSource,
    settings: ChainSettings,
    indent: Indent,
    delimiter: String,
    timestamp_format: TimestampFormat,
    appender: Mutex<Box<dyn Appender>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger writing to standard output
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::with_appender(config, Box::new(ConsoleAppender::new()))
    }

    pub fn with_appender(config: LoggerConfig, appender: Box<dyn Appender>) -> Result<Self> {
        config.validate()?;
        let metrics = Arc::new(LoggerMetrics::new());
        let level = match config.level_file() {
            Some(file) => LevelSource::polled_with_metrics(config.level, file, Arc::clone(&metrics))?,
            None => LevelSource::fixed_with_metrics(config.level, Arc::clone(&metrics)),
        };

        Ok(Self {
            level,
            settings: config.chain_settings(),
            indent: config.indent,
            delimiter: config.delimiter,
            timestamp_format: config.timestamp_format,
            appender: Mutex::new(appender),
            metrics,
        })
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use safe_json_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .appender(MemoryAppender::new())
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.is_enabled(LogLevel::Info));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.level.is_enabled(level)
    }

    pub fn level(&self) -> ActiveLevel {
        self.level.current()
    }

    pub fn set_level(&self, level: impl Into<ActiveLevel>) {
        self.level.set_level(level);
    }

    pub fn level_source(&self) -> &LevelSource {
        &self.level
    }

    /// Stop hot-reloading the level. Safe to call more than once.
    pub fn stop_level_polling(&self) {
        self.level.stop();
    }

    pub fn log(&self, level: LogLevel, payload: impl Into<LogValue>) {
        self.log_with(level, payload, CallArg::None, None);
    }

    /// Log with the flexible second and third positional arguments
    pub fn log_with(
        &self,
        level: LogLevel,
        payload: impl Into<LogValue>,
        arg: impl Into<CallArg>,
        indent: Option<Indent>,
    ) {
        if !self.level.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }

        let (replacer, arg_indent) = arg.into().classify();
        let indent = arg_indent.or(indent);
        let indent = indent.as_ref().unwrap_or(&self.indent);
        let envelope = LogEnvelope::new(level, payload.into());

        let line = match self.render(&envelope, replacer.as_ref(), indent) {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.metrics.record_omitted();
                return;
            }
            Err(e) => {
                self.metrics.record_serialization_failure();
                self.fallback_line(&envelope, &e)
            }
        };

        self.write_line(line);
    }

    /// Render one envelope without the delimiter. `Ok(None)` if a transformer
    /// omitted the root.
    pub fn render(
        &self,
        envelope: &LogEnvelope,
        replacer: Option<&Replacer>,
        indent: &Indent,
    ) -> Result<Option<String>> {
        let root = envelope.to_value(&self.timestamp_format);
        let chain = TransformerChain::for_call(&self.settings, replacer);

        // A panicking replacer must not unwind into the caller
        let rendered = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            CycleSafeSerializer::new(&chain, indent).to_string(&root)
        }));

        match rendered {
            Ok(result) => result,
            Err(panic_info) => Err(LoggerError::serialization(panic_message(panic_info))),
        }
    }

    fn fallback_line(&self, envelope: &LogEnvelope, error: &LoggerError) -> String {
        let fallback = serde_json::json!({
            "time": self.timestamp_format.to_value(&envelope.time),
            "level": envelope.level.to_str(),
            "log": { "error": format!("[serialization failed: {}]", error) },
        });
        serializer::render(&fallback, &Indent::None)
            .unwrap_or_else(|_| r#"{"log":{"error":"[serialization failed]"}}"#.to_string())
    }

    /// Hand one line to the appender with panic isolation
    fn write_line(&self, mut line: String) {
        line.push_str(&self.delimiter);
        let mut appender = self.appender.lock();

        let append_result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.append(&line)));

        match append_result {
            Ok(Ok(())) => {
                self.metrics.record_written();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                self.metrics.record_write_failure();
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    appender.name(),
                    panic_message(panic_info)
                );
                self.metrics.record_write_failure();
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use safe_json_logger::prelude::*;
    /// use serde_json::json;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Info)
    ///     .appender(MemoryAppender::new())
    ///     .build()
    ///     .unwrap();
    ///
    /// logger.debug(json!("hidden"));
    /// logger.info(json!("shown"));
    ///
    /// assert_eq!(logger.metrics().suppressed_count(), 1);
    /// assert_eq!(logger.metrics().lines_written(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn trace(&self, payload: impl Into<LogValue>) {
        self.log(LogLevel::Trace, payload);
    }

    #[inline]
    pub fn debug(&self, payload: impl Into<LogValue>) {
        self.log(LogLevel::Debug, payload);
    }

    #[inline]
    pub fn info(&self, payload: impl Into<LogValue>) {
        self.log(LogLevel::Info, payload);
    }

    #[inline]
    pub fn warn(&self, payload: impl Into<LogValue>) {
        self.log(LogLevel::Warn, payload);
    }

    #[inline]
    pub fn error(&self, payload: impl Into<LogValue>) {
        self.log(LogLevel::Error, payload);
    }

    #[inline]
    pub fn fatal(&self, payload: impl Into<LogValue>) {
        self.log(LogLevel::Fatal, payload);
    }

    #[inline]
    pub fn trace_with(&self, payload: impl Into<LogValue>, arg: impl Into<CallArg>, indent: Option<Indent>) {
        self.log_with(LogLevel::Trace, payload, arg, indent);
    }

    #[inline]
    pub fn debug_with(&self, payload: impl Into<LogValue>, arg: impl Into<CallArg>, indent: Option<Indent>) {
        self.log_with(LogLevel::Debug, payload, arg, indent);
    }

    #[inline]
    pub fn info_with(&self, payload: impl Into<LogValue>, arg: impl Into<CallArg>, indent: Option<Indent>) {
        self.log_with(LogLevel::Info, payload, arg, indent);
    }

    #[inline]
    pub fn warn_with(&self, payload: impl Into<LogValue>, arg: impl Into<CallArg>, indent: Option<Indent>) {
        self.log_with(LogLevel::Warn, payload, arg, indent);
    }

    #[inline]
    pub fn error_with(&self, payload: impl Into<LogValue>, arg: impl Into<CallArg>, indent: Option<Indent>) {
        self.log_with(LogLevel::Error, payload, arg, indent);
    }

    #[inline]
    pub fn fatal_with(&self, payload: impl Into<LogValue>, arg: impl Into<CallArg>, indent: Option<Indent>) {
        self.log_with(LogLevel::Fatal, payload, arg, indent);
    }
}

fn panic_message(panic_info: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.level.stop();
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("indent", &self.indent)
            .field("delimiter", &self.delimiter)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use safe_json_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .replacer_keys(["user", "action"])
///     .always_exclude_values(["hunter2"])
///     .excluded_value("[REDACTED]")
///     .indent(Indent::Spaces(2))
///     .appender(MemoryAppender::new())
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    appender: Option<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            appender: None,
        }
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn replacer(mut self, replacer: Replacer) -> Self {
        self.config.replacer = Some(replacer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn replacer_keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replacer(Replacer::keys(keys))
    }

    #[must_use = "builder methods return a new value"]
    pub fn replacer_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Field<'_>, LogValue) -> Option<LogValue> + Send + Sync + 'static,
    {
        self.replacer(Replacer::function(f))
    }

    /// Key list replacers include (`true`, default) or exclude their keys
    #[must_use = "builder methods return a new value"]
    pub fn replacer_array_includes(mut self, includes: bool) -> Self {
        self.config.replacer_array_includes = includes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn always_include_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.always_include_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn always_exclude_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.config.always_exclude_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Emit `value` in place of blacklisted values instead of dropping them
    #[must_use = "builder methods return a new value"]
    pub fn excluded_value(mut self, value: impl Into<LogValue>) -> Self {
        self.config.excluded_value = Redaction::Replace(value.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn indent(mut self, indent: impl Into<Indent>) -> Self {
        self.config.indent = indent.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.config.delimiter = delimiter.into();
        self
    }

    /// Hot-reload the level from this file
    #[must_use = "builder methods return a new value"]
    pub fn level_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_level_file = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.log_level_poll_seconds = interval.as_secs_f64();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Output sink; standard output when unset
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        match self.appender {
            Some(appender) => Logger::with_appender(self.config, appender),
            None => Logger::new(self.config),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use serde_json::{json, Value};

    fn logger_at(level: LogLevel) -> (Logger, MemoryAppender) {
        let sink = MemoryAppender::new();
        let logger = Logger::builder()
            .level(level)
            .appender(sink.clone())
            .build()
            .unwrap();
        (logger, sink)
    }

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_builder_default_is_off() {
        let logger = Logger::builder().appender(MemoryAppender::new()).build().unwrap();
        assert_eq!(logger.level(), ActiveLevel::Known(LogLevel::Off));
        assert!(!logger.is_enabled(LogLevel::Fatal));
    }

    #[test]
    fn test_envelope_written() {
        let (logger, sink) = logger_at(LogLevel::Debug);
        logger.info(json!({"a": 1, "b": 2}));
        logger.trace(json!({"a": 1}));

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let line = parse(&lines[0]);
        assert_eq!(line["level"], "info");
        assert_eq!(line["log"], json!({"a": 1, "b": 2}));
        assert!(line["time"].as_str().unwrap().ends_with('Z'));
        assert!(sink.contents().ends_with('\n'));
        assert_eq!(logger.metrics().suppressed_count(), 1);
    }

    #[test]
    fn test_set_level_at_runtime() {
        let (logger, sink) = logger_at(LogLevel::Error);
        logger.warn(json!("dropped"));
        logger.set_level(LogLevel::Warn);
        logger.warn(json!("kept"));
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_call_arg_classification() {
        assert!(matches!(CallArg::from(2).classify(), (None, Some(Indent::Spaces(2)))));
        assert!(matches!(CallArg::from("4").classify(), (None, Some(Indent::Text(ref s))) if s == "4"));
        assert!(matches!(CallArg::from("\t").classify(), (None, Some(Indent::Text(_)))));
        assert!(matches!(CallArg::from(["a", "b"]).classify(), (Some(Replacer::Keys(_)), None)));
        assert!(matches!(CallArg::from(["2"]).classify(), (None, Some(Indent::Spaces(2)))));
        assert!(matches!(CallArg::from(["10", "x"]).classify(), (None, Some(Indent::Spaces(10)))));
        assert!(matches!(CallArg::function(|_, v| Some(v)).classify(), (Some(Replacer::Function(_)), None)));
        assert!(matches!(CallArg::None.classify(), (None, None)));
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("  42abc"), Some(42));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("a1"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn test_indent_argument_disables_call_replacer() {
        let (logger, sink) = logger_at(LogLevel::Info);
        logger.info_with(json!({"a": 1}), 2, None);
        assert!(sink.contents().contains("\n  \"level\": \"info\""));
    }

    #[test]
    fn test_third_argument_indent() {
        let (logger, sink) = logger_at(LogLevel::Info);
        logger.info_with(json!({"a": 1, "b": 2}), ["a"], Some(Indent::Spaces(1)));
        let contents = sink.contents();
        assert!(contents.contains("\n \"log\": {"));
        let line: Value = serde_json::from_str(contents.trim_end()).unwrap();
        assert_eq!(line["log"], json!({"a": 1}));
    }

    #[test]
    fn test_panicking_replacer_falls_back() {
        let (logger, sink) = logger_at(LogLevel::Info);
        logger.info_with(
            json!({"a": 1}),
            CallArg::function(|field, v| {
                if field.key == "a" {
                    panic!("replacer blew up");
                }
                Some(v)
            }),
            None,
        );

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let line = parse(&lines[0]);
        assert_eq!(line["level"], "info");
        assert!(line["log"]["error"].as_str().unwrap().contains("replacer blew up"));
        assert_eq!(logger.metrics().serialization_failures(), 1);
    }

    #[test]
    fn test_root_omission_writes_nothing() {
        let (logger, sink) = logger_at(LogLevel::Info);
        logger.info_with(json!(1), CallArg::function(|field, v| {
            if field.is_root() { None } else { Some(v) }
        }), None);
        assert!(sink.lines().is_empty());
        assert_eq!(logger.metrics().omitted_count(), 1);
    }

    #[test]
    fn test_failing_appender_is_absorbed() {
        struct Broken;
        impl Appender for Broken {
            fn append(&mut self, _line: &str) -> Result<()> {
                Err(LoggerError::other("disk full"))
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "broken"
            }
        }

        let logger = Logger::builder()
            .level(LogLevel::Trace)
            .appender(Broken)
            .build()
            .unwrap();
        logger.fatal(json!("still returns"));
        assert_eq!(logger.metrics().write_failures(), 1);
        assert_eq!(logger.metrics().lines_written(), 0);
    }

    #[test]
    fn test_numeric_string_indent_is_verbatim() {
        let (logger, sink) = logger_at(LogLevel::Info);
        logger.info_with(json!({"a": 1}), "4", None);
        let contents = sink.contents();
        assert!(contents.starts_with("{\n4\"time\": "));
        assert!(contents.contains("\n44\"a\": 1"));
    }

    #[test]
    fn test_replacer_returning_payload_is_marked() {
        let (logger, sink) = logger_at(LogLevel::Info);
        let payload = LogValue::object().with("x", "swap").with("y", 2);
        let swapped = payload.clone();
        logger.info_with(
            payload,
            CallArg::function(move |field, v| {
                if field.key == "x" {
                    Some(LogValue::from(swapped.clone()))
                } else {
                    Some(v)
                }
            }),
            None,
        );

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(parse(&lines[0])["log"], json!({"x": "[Circular ~.log]", "y": 2}));
    }

    #[test]
    fn test_too_deep_payload_falls_back() {
        let (logger, sink) = logger_at(LogLevel::Info);
        let mut deep = LogValue::from(0);
        for _ in 0..3_000 {
            deep = LogValue::from(vec![deep]);
        }
        logger.info(deep);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let line = parse(&lines[0]);
        assert_eq!(line["level"], "info");
        assert!(line["log"]["error"].as_str().unwrap().contains("nested deeper than"));
        assert_eq!(logger.metrics().serialization_failures(), 1);
    }

    #[test]
    fn test_custom_delimiter() {
        let sink = MemoryAppender::new();
        let logger = Logger::builder()
            .level(LogLevel::Info)
            .delimiter("\u{1e}")
            .appender(sink.clone())
            .build()
            .unwrap();
        logger.info(json!(1));
        logger.info(json!(2));
        assert_eq!(sink.contents().matches('\u{1e}').count(), 2);
        assert!(!sink.contents().contains('\n'));
    }
}
