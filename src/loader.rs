use crate::errors::{AppError, AppResult};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const INDEX_COLUMN: &str = "index";

/// Writes `table` to `path` as CSV, replacing any existing file.
///
/// The first column holds the zero-based row index and its header cell is blank, so
/// the header reads `,car_model,year_of_manufacture,price,fuel`. Nulls are written
/// as empty cells.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be created or written and `DataFrameError`
/// if serialization fails.
pub fn write_csv(path: &Path, table: &DataFrame) -> AppResult<()> {
    let mut indexed = table.with_row_index(INDEX_COLUMN, None)?;

    let file = File::create(path).map_err(|e| {
        AppError::IoError(format!(
            "Failed to create output file {}: {e}",
            path.display()
        ))
    })?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, ",{}", table.get_column_names().join(",")).map_err(|e| {
        AppError::IoError(format!("Failed to write header to {}: {e}", path.display()))
    })?;

    CsvWriter::new(&mut writer)
        .include_header(false)
        .finish(&mut indexed)
        .map_err(|e| AppError::DataFrameError(format!("Failed to write CSV file: {e}")))?;

    writer.flush().map_err(|e| {
        AppError::IoError(format!(
            "Failed to flush output file {}: {e}",
            path.display()
        ))
    })?;

    info!(
        file = %path.display(),
        rows = table.height(),
        "Output written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COL_CAR_MODEL, COL_FUEL, COL_PRICE, COL_YEAR};
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Series::new(COL_CAR_MODEL, &[Some("Civic"), Some("Model3")]),
            Series::new(COL_YEAR, &[2019i64, 2021]),
            Series::new(COL_PRICE, &[15500.25f64, 35200.5]),
            Series::new(COL_FUEL, &[Some("Petrol"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn write_csv_prefixes_row_index() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transformed_data.csv");

        write_csv(&path, &sample()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], ",car_model,year_of_manufacture,price,fuel");
        assert_eq!(lines[1], "0,Civic,2019,15500.25,Petrol");
        assert_eq!(lines[2], "1,Model3,2021,35200.5,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn write_csv_empty_table_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        write_csv(&path, &crate::extractor::empty_table().unwrap()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, ",car_model,year_of_manufacture,price,fuel\n");
    }

    #[test]
    fn write_csv_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        fs::write(&path, "stale content\nthat is long\nand should vanish\n").unwrap();

        write_csv(&path, &sample()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn write_csv_missing_directory_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing/out.csv");
        let err = write_csv(&path, &sample()).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
