use crate::config::EtlConfig;
use crate::errors::AppResult;
use crate::pipeline::{run, RunSummary};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

fn command() -> Command<'static> {
    Command::new("car-etl")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help("Without options, reads every *.csv, *.json and *.xml file in the current\ndirectory and writes transformed_data.csv next to them.\nExample:\n  car-etl --config etl.toml")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML file overriding paths and failure policies")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .help("Directory to read input files from (overrides working_dir)")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Builds the run configuration from parsed arguments.
///
/// Starts from the defaults, applies the TOML file when `--config` is given, then
/// `--dir` on top.
fn resolve_config(matches: &ArgMatches) -> AppResult<EtlConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => EtlConfig::from_toml_file(path)?,
        None => EtlConfig::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("dir") {
        config.working_dir = dir.clone();
    }
    Ok(config)
}

/// Parses command-line arguments and runs the ETL job.
///
/// # Returns
///
/// Returns the run summary if every phase completed. Returns an error if the
/// configuration file is invalid, the working directory cannot be listed, an
/// extractor failure is configured to abort, or the output cannot be written.
pub fn cli() -> AppResult<RunSummary> {
    let matches = command().get_matches();
    let config = resolve_config(&matches)?;

    let summary = run(&config)?;
    info!(
        rows = summary.rows_written,
        output = %summary.output_path.display(),
        skipped_sources = summary.report.sources_skipped,
        rejected_entries = summary.report.entries_rejected,
        "ETL job completed successfully"
    );
    Ok(summary)
}
