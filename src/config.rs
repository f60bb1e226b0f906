use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_OUTPUT_FILE};
use crate::errors::{AppError, AppResult, ErrorKind, ExtractError};
use crate::models::SourceFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What to do when an extractor reports a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureAction {
    /// Report the failure and continue without the offending source or entry
    Skip,
    /// Stop the run and propagate the failure
    Abort,
}

/// Per-format failure handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcePolicy {
    /// Applied when a whole file cannot be read or parsed
    pub on_unreadable: FailureAction,
    /// Applied when a single entry fails validation
    #[serde(default = "default_on_invalid_entry")]
    pub on_invalid_entry: FailureAction,
}

impl SourcePolicy {
    pub const fn skip_all() -> Self {
        Self {
            on_unreadable: FailureAction::Skip,
            on_invalid_entry: FailureAction::Skip,
        }
    }

    pub const fn abort_unreadable() -> Self {
        Self {
            on_unreadable: FailureAction::Abort,
            on_invalid_entry: FailureAction::Skip,
        }
    }

    /// Returns the action configured for the kind of `err`.
    pub fn action_for(&self, err: &ExtractError) -> FailureAction {
        match err.kind {
            ErrorKind::SourceUnreadable => self.on_unreadable,
            ErrorKind::EntryInvalid => self.on_invalid_entry,
        }
    }
}

fn default_on_invalid_entry() -> FailureAction {
    FailureAction::Skip
}

/// Resolved pipeline configuration with all values filled in.
///
/// Every field has a default, so an empty TOML file reproduces the stock behavior:
/// read the current directory, write `transformed_data.csv`, log to `etl_log_file.txt`,
/// skip unreadable CSV/JSON files and abort on malformed XML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    /// Directory scanned for input files
    pub working_dir: PathBuf,
    /// Output CSV file; relative paths resolve against `working_dir`
    pub output_file: PathBuf,
    /// Progress log file; relative paths resolve against `working_dir`
    pub log_file: PathBuf,

    // Failure policies
    pub csv: SourcePolicy,
    pub json: SourcePolicy,
    pub xml: SourcePolicy,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            csv: SourcePolicy::skip_all(),
            json: SourcePolicy::skip_all(),
            xml: SourcePolicy::abort_unreadable(),
        }
    }
}

impl EtlConfig {
    /// Default configuration rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// Missing keys take their defaults; unknown keys are rejected so typos are not
    /// silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, `ParseError` if the TOML is
    /// malformed or contains unknown keys, and `InvalidInput` if it names an empty
    /// output or log file.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: EtlConfig = toml::from_str(&contents)
            .map_err(|e| AppError::ParseError(format!("Failed to parse config: {e}")))?;

        if config.output_file.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "Output file must not be empty".into(),
            ));
        }
        if config.log_file.as_os_str().is_empty() {
            return Err(AppError::InvalidInput("Log file must not be empty".into()));
        }

        Ok(config)
    }

    pub fn output_path(&self) -> PathBuf {
        self.working_dir.join(&self.output_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.working_dir.join(&self.log_file)
    }

    pub fn policy(&self, format: SourceFormat) -> &SourcePolicy {
        match format {
            SourceFormat::Csv => &self.csv,
            SourceFormat::Json => &self.json,
            SourceFormat::Xml => &self.xml,
        }
    }
}
