//! Logger configuration snapshot and its fluent builder

use super::error::{LoggerError, Result};
use super::filter::LogFilter;
use super::formatter::FormatMode;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Size-based rotation settings for the file sink
///
/// # Examples
///
/// ```
/// use app_logger_system::core::RotationPolicy;
///
/// let policy = RotationPolicy::new()
///     .with_max_size(2 * 1024 * 1024)
///     .with_max_backups(5);
/// assert_eq!(policy.max_backup_files, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationPolicy {
    /// Rotate once the active file grows beyond this many bytes
    pub max_file_size: u64,
    /// Maximum number of rotated files to keep
    pub max_backup_files: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024,
            max_backup_files: 3,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backup_files = count;
        self
    }
}

/// Where and how the file sink writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    pub directory: PathBuf,
    #[serde(default = "FileOptions::default_prefix")]
    pub file_prefix: String,
    #[serde(default)]
    pub rotation: RotationPolicy,
}

impl FileOptions {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: Self::default_prefix(),
            rotation: RotationPolicy::default(),
        }
    }

    fn default_prefix() -> String {
        "app".to_string()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.rotation.max_file_size = size;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.rotation.max_backup_files = count;
        self
    }
}

/// Immutable configuration applied by `Logger::configure`
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes. Filters cannot be expressed in JSON and are registered through
/// [`LoggerConfigBuilder::add_filter`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub console_enabled: bool,
    pub file_enabled: bool,
    pub show_emoji: bool,
    pub use_colors: bool,
    pub show_thread: bool,
    pub show_file: bool,
    pub show_function: bool,
    pub show_line: bool,
    pub format: FormatMode,
    pub timestamp_format: TimestampFormat,
    pub default_tag: String,
    pub file: Option<FileOptions>,
    #[serde(skip)]
    pub filters: Vec<LogFilter>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            console_enabled: true,
            file_enabled: false,
            show_emoji: true,
            use_colors: false,
            show_thread: false,
            show_file: true,
            show_function: true,
            show_line: true,
            format: FormatMode::Detailed,
            timestamp_format: TimestampFormat::default(),
            default_tag: "App".to_string(),
            file: None,
            filters: Vec::new(),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::new()
    }

    /// Parse and validate a configuration from JSON
    ///
    /// # Example
    ///
    /// ```
    /// use app_logger_system::prelude::*;
    ///
    /// let config = LoggerConfig::from_json(r#"{ "min_level": "INFO", "show_emoji": false }"#)
    ///     .unwrap();
    /// assert_eq!(config.min_level, LogLevel::Info);
    /// assert!(config.console_enabled);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Whether any part of the call-site location is rendered
    #[inline]
    pub fn shows_location(&self) -> bool {
        self.show_file || self.show_function || self.show_line
    }

    /// File options when file logging is switched on
    pub fn active_file_options(&self) -> Option<&FileOptions> {
        self.file.as_ref().filter(|_| self.file_enabled)
    }

    fn validate(&self) -> Result<()> {
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "timestamp_format",
                format!("unsupported strftime pattern: {:?}", self.timestamp_format),
            ));
        }
        if !self.file_enabled {
            return Ok(());
        }
        let file = self.file.as_ref().ok_or_else(|| {
            LoggerError::config("file", "a directory is required when file logging is enabled")
        })?;
        if file.directory.as_os_str().is_empty() {
            return Err(LoggerError::config("file", "directory must not be empty"));
        }
        if file.file_prefix.trim().is_empty() {
            return Err(LoggerError::config("file", "file prefix must not be empty"));
        }
        if file.rotation.max_file_size == 0 {
            return Err(LoggerError::config("rotation", "max_file_size must be positive"));
        }
        if file.rotation.max_backup_files == 0 {
            return Err(LoggerError::config(
                "rotation",
                "max_backup_files must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`LoggerConfig`]
///
/// # Example
/// ```
/// use app_logger_system::prelude::*;
///
/// let config = LoggerConfig::builder()
///     .min_level(LogLevel::Info)
///     .format(FormatMode::Compact)
///     .show_thread(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.format, FormatMode::Compact);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.config.console_enabled = enabled;
        self
    }

    /// Enable file logging with the given options
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, options: FileOptions) -> Self {
        self.config.file = Some(options);
        self.config.file_enabled = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_enabled(mut self, enabled: bool) -> Self {
        self.config.file_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn emoji(mut self, enabled: bool) -> Self {
        self.config.show_emoji = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.config.use_colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_thread(mut self, enabled: bool) -> Self {
        self.config.show_thread = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_file(mut self, enabled: bool) -> Self {
        self.config.show_file = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_function(mut self, enabled: bool) -> Self {
        self.config.show_function = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_line(mut self, enabled: bool) -> Self {
        self.config.show_line = enabled;
        self
    }

    /// Toggle file, function and line together
    #[must_use = "builder methods return a new value"]
    pub fn show_location(self, enabled: bool) -> Self {
        self.show_file(enabled)
            .show_function(enabled)
            .show_line(enabled)
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: FormatMode) -> Self {
        self.config.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Use a strftime-compatible pattern for detailed timestamps
    #[must_use = "builder methods return a new value"]
    pub fn custom_timestamp(mut self, pattern: &str) -> Self {
        self.config.timestamp_format = TimestampFormat::Custom(pattern.to_string());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.default_tag = tag.into();
        self
    }

    /// Register a filter; previously registered filters stay in place
    #[must_use = "builder methods return a new value"]
    pub fn add_filter(mut self, filter: LogFilter) -> Self {
        self.config.filters.push(filter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clear_filters(mut self) -> Self {
        self.config.filters.clear();
        self
    }

    /// Validate and freeze the configuration
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] when file logging is
    /// enabled without usable file options.
    pub fn build(self) -> Result<LoggerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
