use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
    /// Failed to parse the TOML configuration
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// DataFrame construction, conversion or serialization failed
    #[error("DataFrame error: {0}")]
    DataFrameError(String),
    /// A source failure that the configured policy escalated
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Classification shared by every extractor failure.
///
/// The extractors only report; whether a failure skips or aborts is decided by the
/// caller through [`crate::config::SourcePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The whole file could not be read, parsed, or conformed to the canonical schema
    SourceUnreadable,
    /// A single entry inside an otherwise readable file is invalid
    EntryInvalid,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceUnreadable => "source unreadable",
            Self::EntryInvalid => "entry invalid",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{} ({}): {message}", path.display(), kind.as_str())]
pub struct ExtractError {
    pub kind: ErrorKind,
    pub path: PathBuf,
    pub message: String,
}

impl ExtractError {
    pub fn unreadable(path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::SourceUnreadable,
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn invalid_entry(path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::EntryInvalid,
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

// Conversion implementations for common errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<polars::prelude::PolarsError> for AppError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        AppError::DataFrameError(err.to_string())
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
