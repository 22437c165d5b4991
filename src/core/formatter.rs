//! Rendering of log entries into display lines
//!
//! Provides the layouts a configuration can select:
//! - Minimal: the message alone
//! - Compact: `🐛 10:30:45.123 DEBUG: message`
//! - Detailed: `🐛 2025-01-08 10:30:45.123 [DEBUG] [main] (main.rs run :42) → message`
//! - Custom: the message alone, reserved for user-defined layouts

use super::config::LoggerConfig;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Layout selected by the configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatMode {
    Minimal,
    Compact,
    #[default]
    Detailed,
    Custom,
}

impl FormatMode {
    /// Format a log entry according to this layout
    pub fn format(&self, entry: &LogEntry, config: &LoggerConfig) -> String {
        match self {
            FormatMode::Minimal | FormatMode::Custom => entry.message.clone(),
            FormatMode::Compact => Self::format_compact(entry, config),
            FormatMode::Detailed => Self::format_detailed(entry, config),
        }
    }

    fn format_compact(entry: &LogEntry, config: &LoggerConfig) -> String {
        let time = TimestampFormat::TimeOnly.format(&entry.timestamp);
        if config.show_emoji {
            format!(
                "{} {} {}: {}",
                entry.level.emoji(),
                time,
                entry.level,
                entry.message
            )
        } else {
            format!("{} {}: {}", time, entry.level, entry.message)
        }
    }

    fn format_detailed(entry: &LogEntry, config: &LoggerConfig) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(6);

        if config.show_emoji {
            parts.push(entry.level.emoji().to_string());
        }
        parts.push(config.timestamp_format.format(&entry.timestamp));
        parts.push(format!("[{}]", entry.level));

        if config.show_thread {
            parts.push(format!("[{}]", entry.thread_name));
        }

        if let Some(location) = Self::location(entry, config) {
            parts.push(location);
        }

        parts.push(format!("→ {}", entry.message));
        parts.join(" ")
    }

    /// `(file function :line)` built from the enabled and present parts
    fn location(entry: &LogEntry, config: &LoggerConfig) -> Option<String> {
        if !config.shows_location() {
            return None;
        }
        let origin = entry.origin.as_ref()?;

        let mut pieces: Vec<String> = Vec::with_capacity(3);
        if config.show_file {
            pieces.push(origin.file_name().to_string());
        }
        if config.show_function {
            if let Some(ref function) = origin.function {
                pieces.push(function.clone());
            }
        }
        if config.show_line {
            pieces.push(format!(":{}", origin.line));
        }

        if pieces.is_empty() {
            None
        } else {
            Some(format!("({})", pieces.join(" ")))
        }
    }
}

/// Render `entry` with the layout chosen by `config`
#[inline]
pub fn format_entry(entry: &LogEntry, config: &LoggerConfig) -> String {
    config.format.format(entry, config)
}
