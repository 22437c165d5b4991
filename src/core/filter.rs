//! Caller-registered entry filters

use super::log_entry::LogEntry;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether an entry reaches the sinks
///
/// Filters registered on a configuration are combined with logical AND and
/// evaluated in registration order.
///
/// # Example
///
/// ```
/// use app_logger_system::prelude::*;
///
/// let config = LoggerConfig::builder()
///     .add_filter(LogFilter::tag_is_not("Analytics"))
///     .add_filter(LogFilter::new(|entry| !entry.message.contains("password")))
///     .build()
///     .unwrap();
/// assert_eq!(config.filters.len(), 2);
/// ```
#[derive(Clone)]
pub struct LogFilter(Arc<dyn Fn(&LogEntry) -> bool + Send + Sync>);

impl LogFilter {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&LogEntry) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Keep only entries carrying exactly this tag
    pub fn tag_is(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self::new(move |entry| entry.tag.as_deref() == Some(tag.as_str()))
    }

    /// Drop entries carrying this tag
    pub fn tag_is_not(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self::new(move |entry| entry.tag.as_deref() != Some(tag.as_str()))
    }

    pub fn message_contains(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        Self::new(move |entry| entry.message.contains(&needle))
    }

    #[inline]
    pub fn matches(&self, entry: &LogEntry) -> bool {
        (self.0)(entry)
    }
}

impl fmt::Debug for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogFilter(..)")
    }
}

/// True when every filter accepts the entry
pub fn passes_all(filters: &[LogFilter], entry: &LogEntry) -> bool {
    filters.iter().all(|filter| filter.matches(entry))
}
