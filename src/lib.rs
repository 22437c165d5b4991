//! # App Logger System
//!
//! Logging facility for mobile applications: log calls return immediately
//! while a background worker filters, formats and writes entries to the
//! platform console and to size-rotated log files.
//!
//! ## Features
//!
//! - **Non-blocking**: entries are queued and written by a dedicated worker
//! - **Ordered**: entries from one thread are written in the order logged
//! - **Rotating files**: dated log files with numbered backups
//! - **Readable output**: emoji level markers, call-site capture and
//!   request/response helpers for network traffic
//!
//! ## Example
//!
//! ```
//! use app_logger_system::prelude::*;
//!
//! let logger = Logger::with_config(
//!     LoggerConfig::builder()
//!         .min_level(LogLevel::Info)
//!         .default_tag("Shop")
//!         .build()
//!         .unwrap(),
//! );
//!
//! logger.info("Cart loaded");
//! logger.log_response("https://api.example.com/cart", 200, 42, None);
//! logger.flush();
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, PlatformLogger, StdPlatformLogger};
    pub use crate::core::{
        Appender, CallSite, FileOptions, FormatMode, LogEntry, LogFilter, LogLevel, Logger,
        LoggerConfig, LoggerConfigBuilder, LoggerError, LoggerMetrics, Result, RotationPolicy,
        SharedError, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT, NETWORK_TAG, TIMING_TAG,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, PlatformLogger, StdPlatformLogger};
pub use core::{
    Appender, CallSite, FileOptions, FormatMode, LogEntry, LogFilter, LogLevel, Logger,
    LoggerConfig, LoggerConfigBuilder, LoggerError, LoggerMetrics, Result, RotationPolicy,
    SharedError, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT, NETWORK_TAG, TIMING_TAG,
};
