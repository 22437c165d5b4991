//! Process-wide logger
//!
//! Mobile applications usually log from everywhere without threading a
//! handle through every layer. The functions here forward to one shared
//! [`Logger`] that is created by the first [`configure`] (or supplied with
//! [`install`]) and lives for the rest of the process.
//!
//! ```
//! use app_logger_system::global;
//! use app_logger_system::prelude::*;
//!
//! global::configure(LoggerConfig::default());
//! global::info("Application started");
//! global::flush();
//! ```

use crate::core::{
    network, CallSite, LogLevel, Logger, LoggerConfig, LoggerError, Result, SharedError,
};
use std::path::PathBuf;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Configure the process-wide logger, creating it on first use
///
/// Later calls replace the configuration of the same instance.
pub fn configure(config: LoggerConfig) {
    LOGGER.get_or_init(Logger::new).configure(config);
}

/// Use `logger` as the process-wide instance
///
/// # Errors
///
/// Returns error if a process-wide logger already exists
pub fn install(logger: Logger) -> Result<()> {
    LOGGER.set(logger).map_err(|_| {
        LoggerError::config("global", "A process-wide logger is already installed")
    })
}

/// The process-wide logger
///
/// # Errors
///
/// Returns [`LoggerError::NotConfigured`] before `configure` or `install`
pub fn logger() -> Result<&'static Logger> {
    LOGGER.get().ok_or(LoggerError::NotConfigured)
}

pub fn is_configured() -> bool {
    LOGGER.get().is_some_and(Logger::is_configured)
}

#[track_caller]
fn instance() -> &'static Logger {
    match logger() {
        Ok(logger) => logger,
        Err(e) => panic!("{}", e),
    }
}

/// Enqueue through the process-wide logger without panicking
///
/// # Errors
///
/// Returns [`LoggerError::NotConfigured`] before `configure`
#[track_caller]
pub fn try_log(
    level: LogLevel,
    message: impl AsRef<str>,
    tag: &str,
    error: Option<SharedError>,
) -> Result<()> {
    logger()?.try_log_at(level, message, tag, error, Some(CallSite::caller()))
}

/// # Panics
///
/// Panics if the process-wide logger has not been configured.
#[track_caller]
pub fn log_with(level: LogLevel, message: impl AsRef<str>, tag: &str, error: Option<SharedError>) {
    instance().log_at(level, message, tag, error, Some(CallSite::caller()));
}

#[track_caller]
pub fn log(level: LogLevel, message: impl AsRef<str>) {
    log_with(level, message, "", None);
}

#[track_caller]
pub fn verbose(message: impl AsRef<str>) {
    log(LogLevel::Verbose, message);
}

#[track_caller]
pub fn debug(message: impl AsRef<str>) {
    log(LogLevel::Debug, message);
}

#[track_caller]
pub fn info(message: impl AsRef<str>) {
    log(LogLevel::Info, message);
}

#[track_caller]
pub fn warning(message: impl AsRef<str>) {
    log(LogLevel::Warning, message);
}

#[track_caller]
pub fn error(message: impl AsRef<str>) {
    log(LogLevel::Error, message);
}

#[track_caller]
pub fn v(message: impl AsRef<str>) {
    verbose(message);
}

#[track_caller]
pub fn d(message: impl AsRef<str>) {
    debug(message);
}

#[track_caller]
pub fn i(message: impl AsRef<str>) {
    info(message);
}

#[track_caller]
pub fn w(message: impl AsRef<str>) {
    warning(message);
}

#[track_caller]
pub fn e(message: impl AsRef<str>) {
    error(message);
}

/// See [`Logger::measure`]
#[track_caller]
pub fn measure<T>(label: &str, op: impl FnOnce() -> T) -> T {
    instance().measure(label, op)
}

#[track_caller]
pub fn log_request(
    method: &str,
    url: &str,
    headers: Option<&[(&str, &str)]>,
    body: Option<&str>,
) {
    let line = network::format_request(method, url, headers, body);
    log_with(LogLevel::Debug, line, network::NETWORK_TAG, None);
}

#[track_caller]
pub fn log_response(url: &str, status: u16, elapsed_ms: u64, body: Option<&str>) {
    let line = network::format_response(url, status, elapsed_ms, body);
    log_with(
        network::response_level(status),
        line,
        network::NETWORK_TAG,
        None,
    );
}

/// Flush the process-wide logger; a no-op before `configure`
pub fn flush() {
    if let Some(logger) = LOGGER.get() {
        logger.flush();
    }
}

/// Shut the process-wide logger down; `true` if there was nothing to stop
pub fn shutdown() -> bool {
    LOGGER.get().map_or(true, Logger::shutdown)
}

pub fn current_log_file() -> Option<PathBuf> {
    LOGGER.get().and_then(Logger::current_log_file)
}

pub fn log_files() -> Vec<PathBuf> {
    LOGGER.get().map(Logger::log_files).unwrap_or_default()
}
