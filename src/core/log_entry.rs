//! Log entry structure

use super::call_site::CallSite;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::error::Error;
use std::sync::Arc;

/// Error object attached to an entry, passed through to sinks untouched
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

// Thread-local cache so repeated log calls do not re-format the thread label
thread_local! {
    static THREAD_LABEL_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Name of the current thread, or its id when the thread is unnamed
fn current_thread_label() -> String {
    THREAD_LABEL_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let thread = std::thread::current();
                match thread.name() {
                    Some(name) => name.to_string(),
                    None => format!("{:?}", thread.id()),
                }
            })
            .clone()
    })
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub tag: Option<String>,
    pub timestamp: DateTime<Local>,
    pub thread_name: String,
    pub origin: Option<CallSite>,
    pub error: Option<SharedError>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so that one entry always occupies exactly one line on disk.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            tag: None,
            timestamp: Local::now(),
            thread_name: current_thread_label(),
            origin: None,
            error: None,
        }
    }

    /// Attach a tag; blank tags are stored as "no tag"
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        let tag = tag.trim();
        self.tag = (!tag.is_empty()).then(|| tag.to_string());
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Option<CallSite>) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: Option<SharedError>) -> Self {
        self.error = error;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The entry's tag, or `default` when it has none
    pub fn tag_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.tag.as_deref().unwrap_or(default)
    }
}
