//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, Result, SharedError};
use std::sync::Arc;

/// The host platform's native logging call
///
/// On a device this forwards to the system log (logcat, os_log); the
/// default [`StdPlatformLogger`] prints a logcat-style line instead.
pub trait PlatformLogger: Send + Sync {
    /// Forward one formatted line; fire-and-forget
    fn log(&self, level: LogLevel, tag: &str, message: &str, error: Option<&SharedError>);

    /// Secondary plain-output channel used for colored local output
    fn write_plain(&self, line: &str) {
        println!("{}", line);
    }

    /// Push out anything the platform buffers
    fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

/// Wrap `line` in the level's foreground color and a reset
///
/// The escape is written unconditionally, whether or not stdout is a
/// terminal.
pub fn colorize(line: &str, level: LogLevel) -> String {
    format!("\x1b[{}m{}\x1b[0m", level.color_code().to_fg_str(), line)
}

/// Prints `D/Tag: message` lines, routing Warning and Error to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdPlatformLogger;

impl PlatformLogger for StdPlatformLogger {
    fn log(&self, level: LogLevel, tag: &str, message: &str, error: Option<&SharedError>) {
        let line = match error {
            Some(err) => format!("{}/{}: {} ({})", level.short(), tag, message, err),
            None => format!("{}/{}: {}", level.short(), tag, message),
        };

        match level {
            LogLevel::Warning | LogLevel::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

pub struct ConsoleAppender {
    platform: Arc<dyn PlatformLogger>,
    default_tag: String,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_platform(Arc::new(StdPlatformLogger))
    }

    pub fn with_platform(platform: Arc<dyn PlatformLogger>) -> Self {
        Self {
            platform,
            default_tag: "App".to_string(),
            use_colors: false,
        }
    }

    /// Tag used for entries logged without one
    #[must_use]
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Also write a colored copy of each line to the plain-output channel
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, formatted: &str) -> Result<()> {
        let tag = entry.tag_or(&self.default_tag);
        self.platform
            .log(entry.level, tag, formatted, entry.error.as_ref());

        if self.use_colors {
            self.platform.write_plain(&colorize(formatted, entry.level));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.platform.flush()
    }

    fn name(&self) -> &str {
        "console"
    }
}
