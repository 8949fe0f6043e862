//! Logger configuration
//!
//! [`LoggerConfig`] is the typed form of the construction options. It can be
//! built in code (usually through [`crate::LoggerBuilder`]) or parsed from
//! JSON using the camelCase option names, e.g.
//!
//! ```
//! use safe_json_logger::{LoggerConfig, LogLevel};
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "level": "debug",
//!     "replacer": ["user", "requestId"],
//!     "alwaysExcludeValues": ["hunter2"],
//!     "excludedValue": "[REDACTED]",
//!     "indent": 2
//! }"#).unwrap();
//! assert_eq!(config.level, LogLevel::Debug);
//! ```
//!
//! Function replacers cannot come from text and are set in code.

use super::chain::{ChainSettings, Replacer};
use super::error::{LoggerError, Result};
use super::level_source::LevelFile;
use super::log_level::LogLevel;
use super::serializer::Indent;
use super::timestamp::TimestampFormat;
use super::transformer::Redaction;
use super::value::LogValue;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

/// Keys an include-mode key list can never drop
pub const DEFAULT_ALWAYS_INCLUDE_KEYS: [&str; 6] = ["time", "level", "log", "name", "message", "stack"];

pub const DEFAULT_POLL_SECONDS: f64 = 10.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
    #[serde(deserialize_with = "deserialize_key_replacer")]
    pub replacer: Option<Replacer>,
    /// Key list replacers include (`true`) or exclude (`false`) the keys
    pub replacer_array_includes: bool,
    pub always_include_keys: Vec<String>,
    pub always_exclude_values: Vec<LogValue>,
    /// Substitute for blacklisted values; omitted fields when unset
    #[serde(deserialize_with = "deserialize_redaction")]
    pub excluded_value: Redaction,
    pub indent: Indent,
    pub delimiter: String,
    pub log_level_file: Option<PathBuf>,
    pub log_level_poll_seconds: f64,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Off,
            replacer: None,
            replacer_array_includes: true,
            always_include_keys: DEFAULT_ALWAYS_INCLUDE_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            always_exclude_values: Vec::new(),
            excluded_value: Redaction::Omit,
            indent: Indent::None,
            delimiter: "\n".to_string(),
            log_level_file: None,
            log_level_poll_seconds: DEFAULT_POLL_SECONDS,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON options object
    pub fn from_json(text: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.log_level_file {
            if path.as_os_str().is_empty() {
                return Err(LoggerError::config("LoggerConfig", "logLevelFile must not be empty"));
            }
            let secs = self.log_level_poll_seconds;
            if !secs.is_finite() || secs <= 0.0 {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!("logLevelPollSeconds must be a positive number, got {}", secs),
                ));
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.log_level_poll_seconds)
            .unwrap_or(Duration::from_secs_f64(DEFAULT_POLL_SECONDS))
    }

    pub fn level_file(&self) -> Option<LevelFile> {
        self.log_level_file
            .as_ref()
            .map(|path| LevelFile::new(path.clone()).with_interval(self.poll_interval()))
    }

    pub(crate) fn chain_settings(&self) -> ChainSettings {
        ChainSettings {
            replacer: self.replacer.clone(),
            array_includes: self.replacer_array_includes,
            always_include_keys: self.always_include_keys.clone(),
            always_exclude_values: self.always_exclude_values.clone(),
            excluded_value: self.excluded_value.clone(),
        }
    }
}

fn deserialize_key_replacer<'de, D>(deserializer: D) -> std::result::Result<Option<Replacer>, D::Error>
where
    D: Deserializer<'de>,
{
    let keys: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(keys.map(Replacer::Keys))
}

fn deserialize_redaction<'de, D>(deserializer: D) -> std::result::Result<Redaction, D::Error>
where
    D: Deserializer<'de>,
{
    LogValue::deserialize(deserializer).map(Redaction::Replace)
}
