//! Rotating file appender
//!
//! Keeps one active file and a bounded set of numbered backups:
//! `app_2025-01-08.log` is the active file, `app_2025-01-08.log.1` the most
//! recent rotation, up to `.N` for `max_backup_files = N`.

use crate::core::{Appender, FileOptions, LogEntry, LoggerError, Result, RotationPolicy};
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ANSI escape pattern is valid")
});

/// Remove terminal color and cursor sequences
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(line, "")
}

pub struct FileAppender {
    path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl FileAppender {
    /// Open the dated log file described by `options`
    ///
    /// The date in the file name is taken now and does not change at
    /// midnight; a new dated file starts with the next `configure`.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or the file cannot be created
    pub fn new(options: &FileOptions) -> Result<Self> {
        let name = Self::dated_file_name(&options.file_prefix, Local::now().date_naive());
        Self::with_path(options.directory.join(name), options.rotation.clone())
    }

    /// Open (or create) `path` directly
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory or the file cannot be created
    pub fn with_path(path: impl Into<PathBuf>, policy: RotationPolicy) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = Self::open_append(&path)?;
        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    pub fn dated_file_name(prefix: &str, date: NaiveDate) -> String {
        format!("{}_{}.log", prefix, date.format("%Y-%m-%d"))
    }

    fn open_append(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
            })
    }

    /// Append one line, rotating first if the file is already over the limit
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        if self.should_rotate() {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );
                self.recover_writer()?;
            }
        }

        let mut record = strip_ansi(line).into_owned();
        record.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::file_appender(self.path.display().to_string(), "Writer not initialized"))?;
        writer.write_all(record.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += record.len() as u64;
        Ok(())
    }

    fn should_rotate(&self) -> bool {
        self.current_size > self.policy.max_file_size
    }

    /// Shift backups up by one, move the active file to `.1`, start fresh
    fn rotate(&mut self) -> Result<()> {
        // Release the handle before renaming the file underneath it
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        for i in (1..self.policy.max_backup_files).rev() {
            let old_path = self.backup_path(i);
            if !old_path.exists() {
                continue;
            }
            let new_path = self.backup_path(i + 1);
            Self::rename_replacing(&old_path, &new_path)?;
        }

        if self.path.exists() {
            Self::rename_replacing(&self.path, &self.backup_path(1))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;

        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }

    /// Rename, replacing `to`; some platforms refuse to rename onto an existing file
    fn rename_replacing(from: &Path, to: &Path) -> Result<()> {
        if fs::rename(from, to).is_ok() {
            return Ok(());
        }
        if to.exists() {
            let _ = fs::remove_file(to);
        }
        fs::rename(from, to).map_err(|e| {
            LoggerError::file_rotation(
                from.display().to_string(),
                format!("Failed to rename to '{}': {}", to.display(), e),
            )
        })
    }

    /// Re-open the active path after a failed rotation
    fn recover_writer(&mut self) -> Result<()> {
        if self.writer.is_none() {
            let file = Self::open_append(&self.path).inspect_err(|e| {
                eprintln!(
                    "[LOGGER ERROR] Failed to reopen log file after rotation failure: {}",
                    e
                );
            })?;
            self.writer = Some(BufWriter::new(file));
        }
        // Stop retrying on every write; the file may outgrow the limit this once
        self.current_size = 0;
        Ok(())
    }

    pub fn backup_path(&self, index: usize) -> PathBuf {
        Self::backup_path_for(&self.path, index)
    }

    pub fn backup_path_for(path: &Path, index: usize) -> PathBuf {
        let mut backup = path.to_path_buf();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        backup.set_file_name(format!("{}.{}", filename, index));
        backup
    }

    /// Active file followed by the existing backups, newest first
    pub fn log_files(&self) -> Vec<PathBuf> {
        Self::log_files_for(&self.path, self.policy.max_backup_files)
    }

    pub fn log_files_for(path: &Path, max_backup_files: usize) -> Vec<PathBuf> {
        std::iter::once(path.to_path_buf())
            .chain((1..=max_backup_files).map(|i| Self::backup_path_for(path, i)))
            .filter(|p| p.exists())
            .collect()
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

impl Appender for FileAppender {
    fn append(&mut self, _entry: &LogEntry, formatted: &str) -> Result<()> {
        self.write_line(formatted)
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
