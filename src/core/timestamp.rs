//! Envelope timestamp formatting
//!
//! The `time` field of every envelope is rendered through a
//! [`TimestampFormat`]. ISO 8601 formats produce strings; Unix formats
//! produce JSON numbers.

use super::value::LogValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format for the envelope `time` field
///
/// # Examples
///
/// ```
/// use safe_json_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    ///
    /// Matches `Date.prototype.toISOString`, the shape most JSON log
    /// consumers expect.
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Envelope value for `datetime`: a number for Unix formats, else a string
    #[must_use]
    pub fn to_value(&self, datetime: &DateTime<Utc>) -> LogValue {
        match self {
            TimestampFormat::Unix => LogValue::from(datetime.timestamp()),
            TimestampFormat::UnixMillis => LogValue::from(datetime.timestamp_millis()),
            _ => LogValue::from(self.format(datetime)),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimestampFormat::Iso8601Micros.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_values_are_numbers() {
        let secs = TimestampFormat::Unix.to_value(&fixed_datetime());
        assert_eq!(secs.to_json(), serde_json::json!(1736332245_i64));
        let millis = TimestampFormat::UnixMillis.to_value(&fixed_datetime());
        assert_eq!(millis.to_json(), serde_json::json!(1736332245123_i64));
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08");
        assert_eq!(
            format.to_value(&fixed_datetime()).as_str(),
            Some("2025/01/08")
        );
    }

    #[test]
    fn test_default_is_iso8601() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Iso8601);
        assert!(!TimestampFormat::default().is_numeric());
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat = serde_json::from_str("\"unixMillis\"").unwrap();
        assert_eq!(format, TimestampFormat::UnixMillis);
        let format: TimestampFormat = serde_json::from_str(r#"{"custom":"%H:%M"}"#).unwrap();
        assert_eq!(format, TimestampFormat::Custom("%H:%M".to_string()));
    }
}
