use std::path::{Path, PathBuf};

/// Input file format understood by the extractors.
///
/// The declaration order is also the order in which sources are concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceFormat {
    Csv,
    Json,
    Xml,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [Self::Csv, Self::Json, Self::Xml];

    /// Returns a human-readable name for the format.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON Lines",
            Self::Xml => "XML",
        }
    }

    /// Returns the file extension (without the dot) that selects this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Maps a file extension to a format, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| ext.eq_ignore_ascii_case(format.extension()))
    }
}

/// One input file paired with the extractor that should read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Builds a source from a path, choosing the format from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        SourceFormat::from_extension(ext).map(|format| Self::new(path, format))
    }
}

/// A single vehicle listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CarRecord {
    pub car_model: Option<String>,
    pub year_of_manufacture: i64,
    pub price: f64,
    pub fuel: Option<String>,
}
