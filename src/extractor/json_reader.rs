use super::schema::conform;
use crate::errors::ExtractError;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Reads a JSON Lines file (one object per line) into the canonical schema.
///
/// Types are inferred over all lines. A structural error on any line rejects the
/// whole file.
pub fn read_json_lines(path: &Path) -> Result<DataFrame, ExtractError> {
    let file = File::open(path).map_err(|e| {
        ExtractError::unreadable(path, format!("Failed to open JSON Lines file: {e}"))
    })?;

    let df = JsonLineReader::new(file)
        .infer_schema_len(None)
        .finish()
        .map_err(|e| ExtractError::unreadable(path, format!("Failed to read JSON Lines: {e}")))?;

    conform(&df, path)
}
