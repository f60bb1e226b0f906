use crate::config::EtlConfig;
use crate::constants::*;
use crate::discovery::find_sources;
use crate::errors::AppResult;
use crate::extractor::{extract_all, ExtractReport};
use crate::loader::write_csv;
use crate::logger::ProgressLog;
use crate::models::SourceFile;
use crate::transform::round_prices;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_written: usize,
    pub output_path: PathBuf,
    pub report: ExtractReport,
}

/// Runs the ETL job over every input file found in `config.working_dir`.
///
/// # Errors
///
/// Returns an error if the working directory cannot be listed or any phase fails.
/// See [`run_with_sources`].
pub fn run(config: &EtlConfig) -> AppResult<RunSummary> {
    let sources = find_sources(&config.working_dir, &config.output_path())?;
    info!(
        working_dir = %config.working_dir.display(),
        sources = sources.len(),
        "Discovered input files"
    );
    run_with_sources(config, &sources)
}

/// Runs the ETL job over an explicit list of sources.
///
/// The sequence is fixed: extract, transform (and print the table), load, with a
/// `Started`/`Ended` progress line around each phase and around the whole job. Any
/// failure stops the run immediately; no further progress lines are written and the
/// output file is left as it was at that point.
///
/// # Errors
///
/// Returns the first failure from the progress log, an aborting extractor policy,
/// the transform, or the output write.
pub fn run_with_sources(config: &EtlConfig, sources: &[SourceFile]) -> AppResult<RunSummary> {
    let log = ProgressLog::new(config.log_path());
    let output_path = config.output_path();

    log.log(MSG_JOB_STARTED)?;

    log.log(MSG_EXTRACT_STARTED)?;
    let extraction = extract_all(sources, config)?;
    log.log(MSG_EXTRACT_ENDED)?;

    log.log(MSG_TRANSFORM_STARTED)?;
    let mut table = extraction.table;
    round_prices(&mut table)?;
    println!("Transformed Data");
    println!("{table}");
    log.log(MSG_TRANSFORM_ENDED)?;

    log.log(MSG_LOAD_STARTED)?;
    write_csv(&output_path, &table)?;
    log.log(MSG_LOAD_ENDED)?;

    log.log(MSG_JOB_ENDED)?;

    Ok(RunSummary {
        rows_written: table.height(),
        output_path,
        report: extraction.report,
    })
}
