use super::schema::conform;
use crate::errors::ExtractError;
use polars::prelude::*;
use std::path::Path;

/// Reads a CSV file with a header row into the canonical schema.
///
/// Column types are inferred from every row, not a leading sample, so a decimal
/// price deep in the file still widens the column to float. Any read or parse
/// failure rejects the whole file; no partial rows are returned.
pub fn read_csv(path: &Path) -> Result<DataFrame, ExtractError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| ExtractError::unreadable(path, format!("Failed to read CSV: {e}")))?;

    conform(&df, path)
}
