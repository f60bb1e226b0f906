mod csv_reader;
mod json_reader;
mod schema;
mod xml_parser;

use crate::config::{EtlConfig, FailureAction};
use crate::errors::{AppResult, ExtractError};
use crate::models::{SourceFile, SourceFormat};
use polars::prelude::*;
use tracing::{debug, info, warn};

// Re-export public API
pub use csv_reader::read_csv;
pub use json_reader::read_json_lines;
pub use schema::{canonical_schema, conform, empty_table, records_to_dataframe};
pub use xml_parser::{parse_xml_bytes, read_xml, XmlRecords};

/// Output of a single extractor run.
#[derive(Debug)]
pub struct Extracted {
    /// Rows read from the source, in the canonical schema
    pub table: DataFrame,
    /// Entry-level failures that did not prevent the rest of the source from loading
    pub rejected: Vec<ExtractError>,
}

impl Extracted {
    fn complete(table: DataFrame) -> Self {
        Self {
            table,
            rejected: Vec::new(),
        }
    }
}

/// Counters describing one aggregation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// Sources that contributed at least one row
    pub sources_read: usize,
    /// Sources that read fine but held no rows
    pub sources_empty: usize,
    /// Sources skipped because they could not be read
    pub sources_skipped: usize,
    /// Entries dropped because they failed validation
    pub entries_rejected: usize,
}

/// The aggregated table together with its report.
#[derive(Debug)]
pub struct Extraction {
    pub table: DataFrame,
    pub report: ExtractReport,
}

/// Runs the extractor matching the source's format.
pub fn extract_source(source: &SourceFile) -> Result<Extracted, ExtractError> {
    match source.format {
        SourceFormat::Csv => read_csv(&source.path).map(Extracted::complete),
        SourceFormat::Json => read_json_lines(&source.path).map(Extracted::complete),
        SourceFormat::Xml => read_xml(&source.path),
    }
}

/// Extracts every source and stacks the results into one canonical table.
///
/// Sources are processed in the given order and their rows keep that order. Each
/// failure is resolved through the policy configured for the source's format:
/// `Skip` logs a warning and moves on, `Abort` returns the failure as an error.
/// Sources yielding zero rows are discarded. With nothing to stack, the empty
/// canonical table is returned so downstream phases always see the same columns.
///
/// # Errors
///
/// Returns `AppError::Extract` for any failure whose policy is `Abort`, and
/// `DataFrameError` if stacking fails.
pub fn extract_all(sources: &[SourceFile], config: &EtlConfig) -> AppResult<Extraction> {
    let mut table = empty_table()?;
    let mut report = ExtractReport::default();

    info!(total = sources.len(), "Starting extraction");

    for source in sources {
        let policy = config.policy(source.format);

        let extracted = match extract_source(source) {
            Ok(extracted) => extracted,
            Err(err) => match policy.action_for(&err) {
                FailureAction::Skip => {
                    warn!(
                        file = %source.path.display(),
                        format = source.format.display_name(),
                        error = %err,
                        "Skipping unreadable source"
                    );
                    report.sources_skipped += 1;
                    continue;
                }
                FailureAction::Abort => return Err(err.into()),
            },
        };

        for err in extracted.rejected {
            match policy.action_for(&err) {
                FailureAction::Skip => {
                    warn!(
                        file = %source.path.display(),
                        error = %err,
                        "Skipping malformed entry"
                    );
                    report.entries_rejected += 1;
                }
                FailureAction::Abort => return Err(err.into()),
            }
        }

        if extracted.table.height() == 0 {
            debug!(file = %source.path.display(), "Source has no rows, discarding");
            report.sources_empty += 1;
            continue;
        }

        table.vstack_mut(&extracted.table)?;
        report.sources_read += 1;
    }

    info!(
        rows = table.height(),
        read = report.sources_read,
        empty = report.sources_empty,
        skipped = report.sources_skipped,
        rejected_entries = report.entries_rejected,
        "Extraction completed"
    );

    Ok(Extraction { table, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcePolicy;
    use crate::constants::{CANONICAL_COLUMNS, COL_CAR_MODEL};
    use crate::errors::{AppError, ErrorKind};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> SourceFile {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        SourceFile::from_path(&path).unwrap()
    }

    fn models(df: &DataFrame) -> Vec<Option<String>> {
        df.column(COL_CAR_MODEL)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_extract_all_no_sources_yields_empty_canonical_table() {
        let extraction = extract_all(&[], &EtlConfig::default()).unwrap();
        assert_eq!(extraction.table.height(), 0);
        assert_eq!(extraction.table.get_column_names(), CANONICAL_COLUMNS);
        assert_eq!(extraction.report, ExtractReport::default());
    }

    #[test]
    fn test_extract_all_preserves_source_order() {
        let temp_dir = TempDir::new().unwrap();
        let sources = vec![
            write(
                temp_dir.path(),
                "a.csv",
                "car_model,year_of_manufacture,price,fuel\nA1,2001,1.0,Petrol\nA2,2002,2.0,Petrol\n",
            ),
            write(
                temp_dir.path(),
                "b.json",
                "{\"car_model\":\"B1\",\"year_of_manufacture\":2003,\"price\":3.0,\"fuel\":\"Diesel\"}\n",
            ),
            write(
                temp_dir.path(),
                "c.xml",
                "<root><r><model>C1</model><year_of_manufacture>2004</year_of_manufacture>\
                 <price>4</price><fuel>CNG</fuel></r></root>",
            ),
        ];

        let extraction = extract_all(&sources, &EtlConfig::default()).unwrap();
        assert_eq!(
            models(&extraction.table),
            vec![
                Some("A1".to_string()),
                Some("A2".to_string()),
                Some("B1".to_string()),
                Some("C1".to_string())
            ]
        );
        assert_eq!(extraction.report.sources_read, 3);
    }

    #[test]
    fn test_extract_all_skips_unreadable_csv_and_json() {
        let temp_dir = TempDir::new().unwrap();
        let sources = vec![
            write(
                temp_dir.path(),
                "bad.csv",
                "car_model,year_of_manufacture,price,fuel\nX,not-a-year,1.0,Petrol\n",
            ),
            write(temp_dir.path(), "bad.json", "{\"car_model\": \n"),
            write(
                temp_dir.path(),
                "good.csv",
                "car_model,year_of_manufacture,price,fuel\nOK,2001,1.0,Petrol\n",
            ),
        ];

        let extraction = extract_all(&sources, &EtlConfig::default()).unwrap();
        assert_eq!(extraction.table.height(), 1);
        assert_eq!(extraction.report.sources_skipped, 2);
        assert_eq!(extraction.report.sources_read, 1);
    }

    #[test]
    fn test_extract_all_aborts_on_malformed_xml_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let sources = vec![write(temp_dir.path(), "bad.xml", "<root><row></root>")];

        let err = extract_all(&sources, &EtlConfig::default()).unwrap_err();
        match err {
            AppError::Extract(inner) => assert_eq!(inner.kind, ErrorKind::SourceUnreadable),
            other => panic!("Expected Extract error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_all_skips_malformed_xml_when_configured() {
        let temp_dir = TempDir::new().unwrap();
        let sources = vec![write(temp_dir.path(), "bad.xml", "<root><row></root>")];
        let config = EtlConfig {
            xml: SourcePolicy::skip_all(),
            ..EtlConfig::default()
        };

        let extraction = extract_all(&sources, &config).unwrap();
        assert_eq!(extraction.table.height(), 0);
        assert_eq!(extraction.report.sources_skipped, 1);
    }

    #[test]
    fn test_extract_all_counts_rejected_xml_entries() {
        let temp_dir = TempDir::new().unwrap();
        let sources = vec![write(
            temp_dir.path(),
            "cars.xml",
            "<root>\
             <r><model>A</model><year_of_manufacture>x</year_of_manufacture><price>1</price><fuel>F</fuel></r>\
             <r><model>B</model><year_of_manufacture>2000</year_of_manufacture><price>1</price><fuel>F</fuel></r>\
             </root>",
        )];

        let extraction = extract_all(&sources, &EtlConfig::default()).unwrap();
        assert_eq!(extraction.table.height(), 1);
        assert_eq!(extraction.report.entries_rejected, 1);
    }

    #[test]
    fn test_extract_all_aborts_on_rejected_entry_when_configured() {
        let temp_dir = TempDir::new().unwrap();
        let sources = vec![write(
            temp_dir.path(),
            "cars.xml",
            "<root><r><model>A</model><year_of_manufacture>x</year_of_manufacture>\
             <price>1</price><fuel>F</fuel></r></root>",
        )];
        let config = EtlConfig {
            xml: SourcePolicy {
                on_unreadable: FailureAction::Abort,
                on_invalid_entry: FailureAction::Abort,
            },
            ..EtlConfig::default()
        };

        let err = extract_all(&sources, &config).unwrap_err();
        assert!(err.to_string().contains("entry invalid"));
    }

    #[test]
    fn test_extract_all_discards_empty_sources() {
        let temp_dir = TempDir::new().unwrap();
        let sources = vec![
            write(
                temp_dir.path(),
                "empty.csv",
                "car_model,year_of_manufacture,price,fuel\n",
            ),
            write(temp_dir.path(), "empty.xml", "<root/>"),
        ];

        let extraction = extract_all(&sources, &EtlConfig::default()).unwrap();
        assert_eq!(extraction.table.height(), 0);
        assert_eq!(extraction.table.width(), 4);
        assert_eq!(extraction.report.sources_empty, 2);
    }
}
