//! Logger metrics for observability
//!
//! Counters describing what the dispatch pipeline did with the entries it
//! was given.

use std::sync::atomic::{AtomicU64, Ordering};

/// Pipeline counters
///
/// # Example
///
/// ```
/// use app_logger_system::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_enqueued();
/// metrics.record_written();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.pending(), 0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Entries accepted by `enqueue`
    enqueued: AtomicU64,

    /// Entries delivered to every enabled sink
    written: AtomicU64,

    /// Entries rejected by the level gate or a filter
    filtered: AtomicU64,

    /// Entries for which at least one sink failed or panicked
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    /// Entries accepted but not yet processed
    pub fn pending(&self) -> u64 {
        self.enqueued()
            .saturating_sub(self.written() + self.filtered() + self.sink_failures())
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_accounts_for_every_outcome() {
        let metrics = LoggerMetrics::new();
        for _ in 0..4 {
            metrics.record_enqueued();
        }
        metrics.record_written();
        metrics.record_filtered();
        metrics.record_sink_failure();

        assert_eq!(metrics.pending(), 1);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_written(), 0);
        assert_eq!(metrics.record_written(), 1);
        assert_eq!(metrics.written(), 2);
    }
}
