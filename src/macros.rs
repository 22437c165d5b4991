//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and, unlike the plain
//! methods, also record the name of the enclosing function. An optional
//! `tag:` prefix sets the entry's tag.
//!
//! # Examples
//!
//! ```
//! use app_logger_system::prelude::*;
//! use app_logger_system::{info, warning};
//!
//! let logger = Logger::with_config(LoggerConfig::default());
//!
//! info!(logger, "Server started");
//!
//! let attempt = 3;
//! warning!(logger, tag: "Sync", "Retry {} of {}", attempt, 5);
//! logger.flush();
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use app_logger_system::prelude::*;
/// # let logger = Logger::with_config(LoggerConfig::default());
/// use app_logger_system::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, tag: "Db", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, tag: $tag:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            format!($($arg)+),
            $tag,
            None,
            Some($crate::call_site!()),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, tag: "", $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use app_logger_system::prelude::*;
/// # let logger = Logger::with_config(LoggerConfig::default());
/// use app_logger_system::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use app_logger_system::prelude::*;
/// # let logger = Logger::with_config(LoggerConfig::default());
/// use app_logger_system::error;
/// error!(logger, tag: "Checkout", "Payment declined: {}", "card expired");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
