//! Per-call log envelope

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use super::value::{LogValue, SharedObject};
use chrono::{DateTime, Utc};

/// `{time, level, log}` wrapper built fresh for every emitted call
#[derive(Debug, Clone)]
pub struct LogEnvelope {
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub log: LogValue,
}

impl LogEnvelope {
    pub fn new(level: LogLevel, log: LogValue) -> Self {
        Self {
            time: Utc::now(),
            level,
            log,
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    /// The envelope as a value graph, keys in `time`, `level`, `log` order
    pub fn to_value(&self, timestamp_format: &TimestampFormat) -> LogValue {
        LogValue::Object(
            SharedObject::new()
                .with("time", timestamp_format.to_value(&self.time))
                .with("level", self.level.to_str())
                .with("log", self.log.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap();
        let envelope = LogEnvelope::new(LogLevel::Warn, LogValue::from(json!({"a": 1})))
            .with_time(time);
        let value = envelope.to_value(&TimestampFormat::Iso8601);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"time":"2024-05-01T12:00:00.000Z","level":"warn","log":{"a":1}}"#
        );
    }

    #[test]
    fn test_envelope_shares_payload() {
        let payload = LogValue::object();
        let envelope = LogEnvelope::new(LogLevel::Info, payload.clone().into());
        let value = envelope.to_value(&TimestampFormat::default());
        let log = value.as_object().unwrap().get("log").unwrap();
        assert!(log.same_value(&LogValue::from(payload)));
    }
}
