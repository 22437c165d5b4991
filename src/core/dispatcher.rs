//! Asynchronous dispatch pipeline
//!
//! Producers append to one unbounded channel; a single worker thread drains
//! it, applies the level gate and the filters, formats each entry once and
//! fans the line out to the enabled appenders.
//!
//! Entries are only ever taken off the channel while the dispatch lock is
//! held, by the worker or by a caller of [`Dispatcher::flush`]. Whoever
//! dequeues an entry processes it; each entry is processed at most once.

use super::appender::Appender;
use super::config::LoggerConfig;
use super::filter::passes_all;
use super::formatter::format_entry;
use super::log_entry::LogEntry;
use super::metrics::LoggerMetrics;
use crossbeam_channel::{unbounded, Receiver, Select, Sender};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default time to wait for the worker thread to stop
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// How long the worker waits for entries before re-checking its liveness flag
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

const BATCH_SIZE: usize = 50;

/// One configuration together with the appenders built from it
pub struct ActiveState {
    config: LoggerConfig,
    appenders: Mutex<Vec<Box<dyn Appender>>>,
}

impl ActiveState {
    pub fn new(config: LoggerConfig, appenders: Vec<Box<dyn Appender>>) -> Self {
        Self {
            config,
            appenders: Mutex::new(appenders),
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Gate, filter, format and write one entry
    fn dispatch(&self, entry: &LogEntry, metrics: &LoggerMetrics) {
        if entry.level < self.config.min_level || !passes_all(&self.config.filters, entry) {
            metrics.record_filtered();
            return;
        }

        let line = format_entry(entry, &self.config);
        let mut appenders = self.appenders.lock();
        let mut has_error = false;

        // Per-appender panic isolation
        for (idx, appender) in appenders.iter_mut().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| appender.append(entry, &line))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} ({}) failed: {}", idx, appender.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_sink_failure();
        } else {
            metrics.record_written();
        }
    }

    fn flush_appenders(&self) {
        let mut appenders = self.appenders.lock();
        for (idx, appender) in appenders.iter_mut().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| appender.flush())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} flush failed: {}", idx, e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked during flush: {}",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// State reachable from both the worker and the caller-side drain
struct Shared {
    receiver: Receiver<LogEntry>,
    state: RwLock<Option<Arc<ActiveState>>>,
    dispatch_lock: Mutex<()>,
    metrics: Arc<LoggerMetrics>,
}

impl Shared {
    fn snapshot(&self) -> Option<Arc<ActiveState>> {
        self.state.read().clone()
    }

    /// Take up to `limit` entries and process them, then flush the appenders
    fn drain(&self, limit: usize) {
        let _guard = self.dispatch_lock.lock();
        let mut touched: Option<Arc<ActiveState>> = None;

        for _ in 0..limit {
            // Each entry sees one complete configuration
            let Some(state) = self.snapshot() else {
                break;
            };
            let Ok(entry) = self.receiver.try_recv() else {
                break;
            };
            state.dispatch(&entry, &self.metrics);

            if touched.as_ref().is_some_and(|t| !Arc::ptr_eq(t, &state)) {
                if let Some(previous) = touched.take() {
                    previous.flush_appenders();
                }
            }
            touched = Some(state);
        }

        if let Some(state) = touched {
            state.flush_appenders();
        }
    }
}

struct Worker {
    running: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl Worker {
    fn spawn(shared: Arc<Shared>) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("log-dispatch".to_string())
            .spawn(move || {
                while flag.load(Ordering::Acquire) {
                    let mut select = Select::new();
                    select.recv(&shared.receiver);
                    if select.ready_timeout(POLL_INTERVAL).is_err() {
                        continue;
                    }
                    if !flag.load(Ordering::Acquire) {
                        break;
                    }
                    shared.drain(BATCH_SIZE);
                }
            })?;

        Ok(Self { running, handle })
    }

    /// Signal the loop to stop and wait for it, up to `timeout`
    fn stop(self, timeout: Duration) -> bool {
        self.running.store(false, Ordering::Release);

        let start = Instant::now();
        loop {
            if self.handle.is_finished() {
                if let Err(e) = self.handle.join() {
                    eprintln!("[LOGGER ERROR] Dispatch worker panicked: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Dispatch worker did not finish within {:?}",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(1));
        }
    }
}

/// Unbounded queue plus one background consumer
pub struct Dispatcher {
    sender: Sender<LogEntry>,
    shared: Arc<Shared>,
    worker: Mutex<Option<Worker>>,
    halted: AtomicBool,
}

impl Dispatcher {
    pub fn new(metrics: Arc<LoggerMetrics>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            shared: Arc::new(Shared {
                receiver,
                state: RwLock::new(None),
                dispatch_lock: Mutex::new(()),
                metrics,
            }),
            worker: Mutex::new(None),
            halted: AtomicBool::new(false),
        }
    }

    /// Append an entry; never blocks
    pub fn enqueue(&self, entry: LogEntry) {
        // The receiver lives as long as `self`, so the send cannot fail
        if self.sender.send(entry).is_ok() {
            self.shared.metrics.record_enqueued();
        }
    }

    pub fn is_configured(&self) -> bool {
        self.shared.state.read().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.worker.lock().is_some()
    }

    /// Entries waiting in the queue
    pub fn queued(&self) -> usize {
        self.shared.receiver.len()
    }

    pub fn active_state(&self) -> Option<Arc<ActiveState>> {
        self.shared.snapshot()
    }

    /// Swap in a new configuration and restart the worker
    ///
    /// The old worker is stopped without draining; entries already queued
    /// are processed by the new worker under the new configuration.
    pub fn restart(&self, state: ActiveState) {
        let mut worker = self.worker.lock();
        if let Some(old) = worker.take() {
            old.stop(DEFAULT_SHUTDOWN_TIMEOUT);
        }

        *self.shared.state.write() = Some(Arc::new(state));
        self.halted.store(false, Ordering::Release);

        match Worker::spawn(Arc::clone(&self.shared)) {
            Ok(new_worker) => *worker = Some(new_worker),
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to start dispatch worker: {}. \
                     Entries are processed on flush only.",
                    e
                );
            }
        }
    }

    /// Process every entry queued at the time of the call, on this thread
    ///
    /// Entries enqueued while the drain runs are left to the worker. After
    /// [`shutdown`](Self::shutdown) this does nothing; entries stay buffered
    /// until the next restart.
    pub fn flush(&self) {
        if self.halted.load(Ordering::Acquire) {
            return;
        }
        let pending = self.shared.receiver.len();
        self.shared.drain(pending);
    }

    /// Flush, then stop the worker
    ///
    /// Returns `false` if the worker did not stop within `timeout`.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let mut worker = self.worker.lock();
        self.flush();
        self.halted.store(true, Ordering::Release);

        match worker.take() {
            Some(old) => old.stop(timeout),
            None => true,
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Result};

    struct Collect(Arc<Mutex<Vec<String>>>);

    impl Appender for Collect {
        fn append(&mut self, _entry: &LogEntry, formatted: &str) -> Result<()> {
            self.0.lock().push(formatted.to_string());
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "collect"
        }
    }

    fn minimal(min_level: LogLevel) -> LoggerConfig {
        LoggerConfig::builder()
            .min_level(min_level)
            .format(crate::core::FormatMode::Minimal)
            .build()
            .unwrap()
    }

    fn dispatcher_with(config: LoggerConfig) -> (Dispatcher, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = Dispatcher::new(Arc::new(LoggerMetrics::new()));
        dispatcher.restart(ActiveState::new(config, vec![Box::new(Collect(lines.clone()))]));
        (dispatcher, lines)
    }

    #[test]
    fn test_flush_processes_queued_entries_in_order() {
        let (dispatcher, lines) = dispatcher_with(minimal(LogLevel::Verbose));
        for i in 0..20 {
            dispatcher.enqueue(LogEntry::new(LogLevel::Info, format!("m{}", i)));
        }
        dispatcher.flush();

        let expected: Vec<String> = (0..20).map(|i| format!("m{}", i)).collect();
        assert_eq!(*lines.lock(), expected);
    }

    #[test]
    fn test_worker_drains_without_flush() {
        let (dispatcher, lines) = dispatcher_with(minimal(LogLevel::Verbose));
        dispatcher.enqueue(LogEntry::new(LogLevel::Info, "background"));

        let deadline = Instant::now() + Duration::from_secs(2);
        while lines.lock().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(*lines.lock(), vec!["background".to_string()]);
    }

    #[test]
    fn test_empty_flush_is_noop() {
        let metrics = Arc::new(LoggerMetrics::new());
        let dispatcher = Dispatcher::new(metrics.clone());
        dispatcher.flush();
        dispatcher.flush();
        assert_eq!(metrics.enqueued(), 0);
        assert_eq!(metrics.written(), 0);
    }

    #[test]
    fn test_shutdown_buffers_until_restart() {
        let (dispatcher, lines) = dispatcher_with(minimal(LogLevel::Verbose));
        dispatcher.enqueue(LogEntry::new(LogLevel::Info, "before"));
        assert!(dispatcher.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
        assert_eq!(*lines.lock(), vec!["before".to_string()]);
        assert!(!dispatcher.is_running());

        dispatcher.enqueue(LogEntry::new(LogLevel::Info, "after"));
        dispatcher.flush();
        thread::sleep(POLL_INTERVAL * 3);
        assert_eq!(lines.lock().len(), 1);
        assert_eq!(dispatcher.queued(), 1);

        dispatcher.restart(ActiveState::new(
            minimal(LogLevel::Verbose),
            vec![Box::new(Collect(lines.clone()))],
        ));
        dispatcher.flush();
        assert_eq!(*lines.lock(), vec!["before".to_string(), "after".to_string()]);
    }

    #[test]
    fn test_restart_keeps_queued_entries() {
        let (dispatcher, first) = dispatcher_with(minimal(LogLevel::Verbose));
        dispatcher.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        dispatcher.enqueue(LogEntry::new(LogLevel::Debug, "queued"));

        let second = Arc::new(Mutex::new(Vec::new()));
        dispatcher.restart(ActiveState::new(
            minimal(LogLevel::Verbose),
            vec![Box::new(Collect(second.clone()))],
        ));
        dispatcher.flush();

        assert!(first.lock().is_empty());
        assert_eq!(*second.lock(), vec!["queued".to_string()]);
    }

    #[test]
    fn test_failing_appender_is_isolated() {
        struct Panicking;
        impl Appender for Panicking {
            fn append(&mut self, _entry: &LogEntry, _formatted: &str) -> Result<()> {
                panic!("sink exploded");
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "panicking"
            }
        }

        let lines = Arc::new(Mutex::new(Vec::new()));
        let metrics = Arc::new(LoggerMetrics::new());
        let dispatcher = Dispatcher::new(metrics.clone());
        dispatcher.restart(ActiveState::new(
            minimal(LogLevel::Verbose),
            vec![Box::new(Panicking), Box::new(Collect(lines.clone()))],
        ));

        dispatcher.enqueue(LogEntry::new(LogLevel::Error, "still delivered"));
        dispatcher.flush();

        assert_eq!(*lines.lock(), vec!["still delivered".to_string()]);
        assert_eq!(metrics.sink_failures(), 1);
    }
}
