//! Core logger types and traits

pub mod appender;
pub mod call_site;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod network;
pub mod timestamp;

pub use appender::Appender;
pub use call_site::CallSite;
pub use config::{FileOptions, LoggerConfig, LoggerConfigBuilder, RotationPolicy};
pub use dispatcher::{ActiveState, Dispatcher, DEFAULT_SHUTDOWN_TIMEOUT};
pub use error::{LoggerError, Result};
pub use filter::LogFilter;
pub use formatter::{format_entry, FormatMode};
pub use log_entry::{LogEntry, SharedError};
pub use log_level::LogLevel;
pub use logger::{Logger, TIMING_TAG};
pub use metrics::LoggerMetrics;
pub use network::NETWORK_TAG;
pub use timestamp::TimestampFormat;
