use crate::errors::{AppError, AppResult};
use crate::utils::format_log_timestamp;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Append-only progress log.
///
/// Each call to [`ProgressLog::log`] opens the file, appends a single
/// `timestamp,message` line and closes it again, so no handle is held between phases.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `message` stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the log file cannot be opened or written.
    pub fn log(&self, message: &str) -> AppResult<()> {
        let timestamp = format_log_timestamp(&Local::now().naive_local());
        self.append_line(&timestamp, message)?;
        info!(timestamp = %timestamp, "{message}");
        Ok(())
    }

    fn append_line(&self, timestamp: &str, message: &str) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                AppError::IoError(format!(
                    "Failed to open log file {}: {e}",
                    self.path.display()
                ))
            })?;

        writeln!(file, "{timestamp},{message}").map_err(|e| {
            AppError::IoError(format!(
                "Failed to write log file {}: {e}",
                self.path.display()
            ))
        })
    }
}
