//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink receiving entries that passed the gate and the filters
///
/// `formatted` is the line produced by the configured layout; `entry` is
/// available for sinks that need the level, tag or attached error.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry, formatted: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
