//! Timestamp formatting utilities
//!
//! Entries carry local wall-clock time; on a phone the reader of the log is
//! the person holding it, so the defaults render local time.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp layout used by the detailed format
///
/// # Examples
///
/// ```
/// use app_logger_system::core::TimestampFormat;
/// use chrono::Local;
///
/// let format = TimestampFormat::Custom("%d/%m %H:%M".to_string());
/// let rendered = format.format(&Local::now());
/// assert_eq!(rendered.len(), 11);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Date and time with milliseconds: `2025-01-08 10:30:45.123`
    #[default]
    DateTime,

    /// Time of day with milliseconds: `10:30:45.123`
    TimeOnly,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+01:00`
    Iso8601,

    /// RFC 3339: `2025-01-08T10:30:45.123456789+01:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

const DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

impl TimestampFormat {
    /// Whether a custom pattern contains only recognized specifiers
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(pattern) => {
                !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }

    /// Render `datetime`; an unusable custom pattern falls back to `DateTime`
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::DateTime => datetime.format(DATE_TIME_PATTERN).to_string(),
            TimestampFormat::TimeOnly => datetime.format("%H:%M:%S%.3f").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut rendered = String::new();
                match write!(rendered, "{}", datetime.format(pattern)) {
                    Ok(()) => rendered,
                    Err(_) => datetime.format(DATE_TIME_PATTERN).to_string(),
                }
            }
        }
    }
}
