//! car-etl library
//!
//! This crate provides the core functionality for the `car-etl` binary.
//! Keep the crate root minimal: implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library merges vehicle listings spread over CSV, JSON Lines and XML files into
//! one CSV file:
//!
//! - [`discovery`] - Finds input files in a directory and pairs them with a format
//! - [`extractor`] - Reads each format into a table with the canonical schema and stacks them
//! - [`transform`] - Rounds prices to two decimals
//! - [`loader`] - Writes the final table as CSV with a leading row index
//! - [`logger`] - Appends timestamped progress lines to the job log
//! - [`pipeline`] - Runs the extract, transform and load phases in order
//! - [`cli`] - Command-line entry point and configuration loading
//! - [`config`] - Paths and per-format failure policies
//! - [`models`] - Records, formats and source descriptors
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use car_etl::{config::EtlConfig, errors::AppResult, pipeline};
//!
//! # fn example() -> AppResult<()> {
//! let config = EtlConfig::in_dir("data/incoming");
//! let summary = pipeline::run(&config)?;
//! println!("wrote {} rows to {}", summary.rows_written, summary.output_path.display());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod errors;
pub mod extractor;
pub mod loader;
pub mod logger;
pub mod models;
pub mod pipeline;
pub mod transform;
pub mod utils;
