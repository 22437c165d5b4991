//! Main logger implementation

use super::{
    appender::Appender,
    call_site::CallSite,
    config::LoggerConfig,
    dispatcher::{ActiveState, Dispatcher, DEFAULT_SHUTDOWN_TIMEOUT},
    error::{LoggerError, Result},
    log_entry::{LogEntry, SharedError},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    network,
};
use crate::appenders::{ConsoleAppender, FileAppender, PlatformLogger, StdPlatformLogger};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tag given to `measure` entries
pub const TIMING_TAG: &str = "Timing";

/// Owned logging instance
///
/// A `Logger` starts unconfigured. [`configure`](Logger::configure) installs
/// a configuration and starts the background worker; calling it again swaps
/// the configuration and restarts the worker without losing queued entries.
///
/// # Example
/// ```
/// use app_logger_system::prelude::*;
///
/// let logger = Logger::new();
/// logger.configure(
///     LoggerConfig::builder()
///         .min_level(LogLevel::Info)
///         .format(FormatMode::Compact)
///         .build()
///         .unwrap(),
/// );
///
/// logger.info("Application started");
/// logger.d("hidden below Info");
/// logger.flush();
/// ```
pub struct Logger {
    dispatcher: Dispatcher,
    platform: Arc<dyn PlatformLogger>,
    metrics: Arc<LoggerMetrics>,
    // Path opened by the file sink of the active configuration
    log_file: RwLock<Option<PathBuf>>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform_logger(Arc::new(StdPlatformLogger))
    }

    /// Create a logger whose console sink writes through `platform`
    #[must_use]
    pub fn with_platform_logger(platform: Arc<dyn PlatformLogger>) -> Self {
        let metrics = Arc::new(LoggerMetrics::new());
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&metrics)),
            platform,
            metrics,
            log_file: RwLock::new(None),
        }
    }

    /// Create and configure in one step
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        let logger = Self::new();
        logger.configure(config);
        logger
    }

    /// Install `config` and (re)start the background worker
    ///
    /// A file sink that cannot be opened is reported on stderr and left
    /// out; console logging keeps working.
    pub fn configure(&self, config: LoggerConfig) {
        let (appenders, log_file) = self.build_appenders(&config);
        *self.log_file.write() = log_file;
        self.dispatcher.restart(ActiveState::new(config, appenders));
    }

    fn build_appenders(&self, config: &LoggerConfig) -> (Vec<Box<dyn Appender>>, Option<PathBuf>) {
        let mut appenders: Vec<Box<dyn Appender>> = Vec::with_capacity(2);
        let mut log_file = None;

        if config.console_enabled {
            appenders.push(Box::new(
                ConsoleAppender::with_platform(Arc::clone(&self.platform))
                    .with_default_tag(config.default_tag.clone())
                    .with_colors(config.use_colors),
            ));
        }

        if let Some(options) = config.active_file_options() {
            match FileAppender::new(options) {
                Ok(appender) => {
                    log_file = Some(appender.path().to_path_buf());
                    appenders.push(Box::new(appender));
                }
                Err(e) => eprintln!(
                    "[LOGGER ERROR] File logging disabled, could not open log file in '{}': {}",
                    options.directory.display(),
                    e
                ),
            }
        }

        (appenders, log_file)
    }

    pub fn is_configured(&self) -> bool {
        self.dispatcher.is_configured()
    }

    /// The active configuration snapshot
    pub fn config(&self) -> Option<LoggerConfig> {
        self.dispatcher
            .active_state()
            .map(|state| state.config().clone())
    }

    /// Path of the active log file, when file logging is on
    pub fn current_log_file(&self) -> Option<PathBuf> {
        self.log_file.read().clone()
    }

    /// Active log file followed by existing backups, newest first
    pub fn log_files(&self) -> Vec<PathBuf> {
        let (Some(path), Some(config)) = (self.current_log_file(), self.config()) else {
            return Vec::new();
        };
        let max_backups = config
            .active_file_options()
            .map_or(0, |options| options.rotation.max_backup_files);
        FileAppender::log_files_for(&path, max_backups)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Enqueue an entry with an explicit call site
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::NotConfigured`] before the first `configure`.
    pub fn try_log_at(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        tag: &str,
        error: Option<SharedError>,
        origin: Option<CallSite>,
    ) -> Result<()> {
        if !self.is_configured() {
            return Err(LoggerError::NotConfigured);
        }

        let entry = LogEntry::new(level, message)
            .with_tag(tag)
            .with_error(error)
            .with_origin(origin);
        self.dispatcher.enqueue(entry);
        Ok(())
    }

    /// Enqueue an entry, recording the caller's file and line
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::NotConfigured`] before the first `configure`.
    #[track_caller]
    pub fn try_log(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        tag: &str,
        error: Option<SharedError>,
    ) -> Result<()> {
        self.try_log_at(level, message, tag, error, Some(CallSite::caller()))
    }

    /// Used by the logging macros
    ///
    /// # Panics
    ///
    /// Panics if the logger has not been configured.
    #[track_caller]
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        tag: &str,
        error: Option<SharedError>,
        origin: Option<CallSite>,
    ) {
        if let Err(e) = self.try_log_at(level, message, tag, error, origin) {
            panic!("{}", e);
        }
    }

    /// Log with a tag and an optional attached error
    ///
    /// An empty tag selects the configured default tag.
    ///
    /// # Panics
    ///
    /// Panics if the logger has not been configured.
    #[track_caller]
    pub fn log_with(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        tag: &str,
        error: Option<SharedError>,
    ) {
        self.log_at(level, message, tag, error, Some(CallSite::caller()));
    }

    /// # Panics
    ///
    /// Panics if the logger has not been configured.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.log_with(level, message, "", None);
    }

    #[inline]
    #[track_caller]
    pub fn verbose(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Verbose, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn v(&self, message: impl AsRef<str>) {
        self.verbose(message);
    }

    #[inline]
    #[track_caller]
    pub fn d(&self, message: impl AsRef<str>) {
        self.debug(message);
    }

    #[inline]
    #[track_caller]
    pub fn i(&self, message: impl AsRef<str>) {
        self.info(message);
    }

    #[inline]
    #[track_caller]
    pub fn w(&self, message: impl AsRef<str>) {
        self.warning(message);
    }

    #[inline]
    #[track_caller]
    pub fn e(&self, message: impl AsRef<str>) {
        self.error(message);
    }

    /// Run `op`, log its wall time at Debug and return its result unchanged
    ///
    /// # Example
    /// ```
    /// use app_logger_system::prelude::*;
    ///
    /// let logger = Logger::with_config(LoggerConfig::default());
    /// let sum = logger.measure("sum", || (1..=10).sum::<u32>());
    /// assert_eq!(sum, 55);
    /// ```
    #[track_caller]
    pub fn measure<T>(&self, label: &str, op: impl FnOnce() -> T) -> T {
        let origin = CallSite::caller();
        let start = Instant::now();
        let result = op();
        let elapsed_ms = start.elapsed().as_millis();

        self.log_at(
            LogLevel::Debug,
            format!("⏱️ {} took {}ms", label, elapsed_ms),
            TIMING_TAG,
            None,
            Some(origin),
        );
        result
    }

    /// Log an outgoing HTTP request at Debug
    #[track_caller]
    pub fn log_request(
        &self,
        method: &str,
        url: &str,
        headers: Option<&[(&str, &str)]>,
        body: Option<&str>,
    ) {
        let line = network::format_request(method, url, headers, body);
        self.log_with(LogLevel::Debug, line, network::NETWORK_TAG, None);
    }

    /// Log an HTTP response; Warning for status 400 and above, else Debug
    #[track_caller]
    pub fn log_response(&self, url: &str, status: u16, elapsed_ms: u64, body: Option<&str>) {
        let line = network::format_response(url, status, elapsed_ms, body);
        self.log_with(
            network::response_level(status),
            line,
            network::NETWORK_TAG,
            None,
        );
    }

    /// Process every entry queued so far before returning
    pub fn flush(&self) {
        self.dispatcher.flush();
    }

    /// Flush, then stop the background worker
    ///
    /// Entries logged afterwards are buffered and processed once
    /// `configure` is called again. Returns `false` if the worker did not
    /// stop within [`DEFAULT_SHUTDOWN_TIMEOUT`].
    pub fn shutdown(&self) -> bool {
        self.shutdown_with_timeout(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    pub fn shutdown_with_timeout(&self, timeout: Duration) -> bool {
        self.dispatcher.shutdown(timeout)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileOptions, FormatMode, LogFilter};
    use parking_lot::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recorder {
        lines: Mutex<Vec<(LogLevel, String, String)>>,
    }

    impl Recorder {
        fn messages(&self) -> Vec<String> {
            self.lines.lock().iter().map(|(_, _, m)| m.clone()).collect()
        }
    }

    impl PlatformLogger for Recorder {
        fn log(&self, level: LogLevel, tag: &str, message: &str, _error: Option<&SharedError>) {
            self.lines
                .lock()
                .push((level, tag.to_string(), message.to_string()));
        }

        fn write_plain(&self, _line: &str) {}
    }

    fn recording_logger(config: LoggerConfig) -> (Logger, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let logger = Logger::with_platform_logger(recorder.clone());
        logger.configure(config);
        (logger, recorder)
    }

    fn minimal() -> crate::core::LoggerConfigBuilder {
        LoggerConfig::builder().format(FormatMode::Minimal)
    }

    #[test]
    fn test_gate_excludes_lower_levels() {
        let (logger, recorder) = recording_logger(minimal().min_level(LogLevel::Debug).build().unwrap());

        logger.verbose("x");
        logger.debug("y");
        logger.flush();

        assert_eq!(recorder.messages(), vec!["y".to_string()]);
    }

    #[test]
    #[should_panic(expected = "not configured")]
    fn test_logging_before_configure_panics() {
        let logger = Logger::new();
        logger.info("too early");
    }

    #[test]
    fn test_try_log_reports_not_configured() {
        let logger = Logger::new();
        let result = logger.try_log(LogLevel::Info, "too early", "", None);
        assert!(matches!(result, Err(LoggerError::NotConfigured)));
    }

    #[test]
    fn test_aliases_map_to_levels() {
        let (logger, recorder) = recording_logger(minimal().min_level(LogLevel::Verbose).build().unwrap());

        logger.v("1");
        logger.d("2");
        logger.i("3");
        logger.w("4");
        logger.e("5");
        logger.flush();

        let levels: Vec<LogLevel> = recorder.lines.lock().iter().map(|(l, _, _)| *l).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_filters_and_default_tag() {
        let config = minimal()
            .default_tag("Shop")
            .add_filter(LogFilter::tag_is_not("Noise"))
            .build()
            .unwrap();
        let (logger, recorder) = recording_logger(config);

        logger.log_with(LogLevel::Info, "dropped", "Noise", None);
        logger.log_with(LogLevel::Info, "kept", "", None);
        logger.flush();

        let lines = recorder.lines.lock();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].1, "Shop");
        assert_eq!(lines[0].2, "kept");
        assert_eq!(logger.metrics().filtered(), 1);
    }

    #[test]
    fn test_call_site_points_at_caller() {
        let config = LoggerConfig::builder()
            .emoji(false)
            .show_function(false)
            .build()
            .unwrap();
        let (logger, recorder) = recording_logger(config);

        logger.info("where am I");
        let expected_line = line!() - 1;
        logger.flush();

        let message = recorder.messages().remove(0);
        assert!(
            message.contains(&format!("(logger.rs :{})", expected_line)),
            "unexpected line: {}",
            message
        );
    }

    #[test]
    fn test_measure_returns_result_and_logs() {
        let (logger, recorder) = recording_logger(minimal().build().unwrap());

        let value = logger.measure("parse", || "42".parse::<i32>());
        logger.flush();

        assert_eq!(value.unwrap(), 42);
        let lines = recorder.lines.lock();
        assert_eq!(lines[0].0, LogLevel::Debug);
        assert_eq!(lines[0].1, TIMING_TAG);
        assert!(lines[0].2.starts_with("⏱️ parse took "));
    }

    #[test]
    fn test_log_response_404_is_warning() {
        let (logger, recorder) = recording_logger(minimal().build().unwrap());

        logger.log_response("https://api.example.com/items/9", 404, 120, Some("missing"));
        logger.log_response("https://api.example.com/items", 200, 35, None);
        logger.flush();

        let lines = recorder.lines.lock();
        assert_eq!(lines[0].0, LogLevel::Warning);
        assert!(lines[0].2.contains(network::CLIENT_ERROR_GLYPH));
        assert!(lines[0].2.contains("404"));
        assert_eq!(lines[1].0, LogLevel::Debug);
        assert!(lines[1].2.contains(network::SUCCESS_GLYPH));
    }

    #[test]
    fn test_log_request_is_debug() {
        let (logger, recorder) = recording_logger(minimal().build().unwrap());

        logger.log_request("get", "https://api.example.com/me", None, None);
        logger.flush();

        let lines = recorder.lines.lock();
        assert_eq!(lines[0].0, LogLevel::Debug);
        assert_eq!(lines[0].1, network::NETWORK_TAG);
        assert!(lines[0].2.contains("GET https://api.example.com/me"));
    }

    #[test]
    fn test_reconfigure_applies_new_level() {
        let (logger, recorder) = recording_logger(minimal().min_level(LogLevel::Error).build().unwrap());
        logger.info("before");
        logger.flush();

        logger.configure(minimal().min_level(LogLevel::Info).build().unwrap());
        logger.info("after");
        logger.flush();

        assert_eq!(recorder.messages(), vec!["after".to_string()]);
    }

    #[test]
    fn test_file_logging_and_log_files() {
        let dir = tempdir().unwrap();
        let config = minimal()
            .console(false)
            .file(FileOptions::new(dir.path()).with_prefix("test"))
            .build()
            .unwrap();
        let logger = Logger::with_config(config);

        logger.info("persisted");
        logger.flush();

        let path = logger.current_log_file().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "persisted\n");
        assert_eq!(logger.log_files(), vec![path]);
    }

    #[test]
    fn test_unsupported_timestamp_pattern_keeps_worker_alive() {
        // Assigned directly, so `build` validation does not reject it
        let mut config = LoggerConfig::builder()
            .emoji(false)
            .show_location(false)
            .build()
            .unwrap();
        config.timestamp_format = crate::core::TimestampFormat::Custom("%Q".to_string());
        let (logger, recorder) = recording_logger(config);

        logger.info("first");
        logger.info("second");
        logger.flush();

        let messages = recorder.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].ends_with("[INFO] → second"));
        assert_eq!(logger.metrics().written(), 2);
    }

    #[test]
    fn test_unwritable_directory_degrades_to_console() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file in the way").unwrap();

        let config = minimal().file(FileOptions::new(&blocker)).build().unwrap();
        let (logger, recorder) = recording_logger(config);

        logger.info("still works");
        logger.flush();

        assert_eq!(recorder.messages(), vec!["still works".to_string()]);
        assert!(logger.current_log_file().is_none());
    }
}
