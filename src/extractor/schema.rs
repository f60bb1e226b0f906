use crate::constants::{COL_CAR_MODEL, COL_FUEL, COL_PRICE, COL_YEAR};
use crate::errors::{AppError, AppResult, ExtractError};
use crate::models::CarRecord;
use polars::prelude::*;
use std::path::Path;
use tracing::warn;

/// Canonical column names and dtypes, in output order.
pub fn canonical_schema() -> [(&'static str, DataType); 4] {
    [
        (COL_CAR_MODEL, DataType::String),
        (COL_YEAR, DataType::Int64),
        (COL_PRICE, DataType::Float64),
        (COL_FUEL, DataType::String),
    ]
}

/// Returns a zero-row DataFrame with the canonical columns.
pub fn empty_table() -> AppResult<DataFrame> {
    let columns: Vec<Series> = canonical_schema()
        .iter()
        .map(|(name, dtype)| Series::new_empty(name, dtype))
        .collect();
    DataFrame::new(columns)
        .map_err(|e| AppError::DataFrameError(format!("Failed to create DataFrame: {e}")))
}

/// Converts records into a DataFrame with the canonical schema.
pub fn records_to_dataframe(records: Vec<CarRecord>) -> AppResult<DataFrame> {
    if records.is_empty() {
        return empty_table();
    }

    let len = records.len();
    let mut models = Vec::with_capacity(len);
    let mut years = Vec::with_capacity(len);
    let mut prices = Vec::with_capacity(len);
    let mut fuels = Vec::with_capacity(len);

    for record in records {
        models.push(record.car_model);
        years.push(record.year_of_manufacture);
        prices.push(record.price);
        fuels.push(record.fuel);
    }

    DataFrame::new(vec![
        Series::new(COL_CAR_MODEL, models),
        Series::new(COL_YEAR, years),
        Series::new(COL_PRICE, prices),
        Series::new(COL_FUEL, fuels),
    ])
    .map_err(|e| AppError::DataFrameError(format!("Failed to create DataFrame: {e}")))
}

/// Reshapes a table read from `source` into the canonical schema.
///
/// Canonical columns are cast strictly to their canonical dtype, missing ones are
/// filled with nulls and any other column is dropped with a warning. A column whose
/// values cannot be cast rejects the whole source.
pub fn conform(df: &DataFrame, source: &Path) -> Result<DataFrame, ExtractError> {
    let schema = canonical_schema();
    let height = df.height();

    let extra: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !schema.iter().any(|(canonical, _)| canonical == name))
        .collect();
    if !extra.is_empty() {
        warn!(
            file = %source.display(),
            columns = ?extra,
            "Dropping columns outside the canonical schema"
        );
    }

    let mut columns = Vec::with_capacity(schema.len());
    for (name, dtype) in &schema {
        let column = match df.column(name) {
            Ok(series) => cast_column(series, name, dtype, source)?,
            Err(_) => {
                warn!(
                    file = %source.display(),
                    column = name,
                    "Canonical column missing, filling with nulls"
                );
                Series::full_null(name, height, dtype)
            }
        };
        columns.push(column);
    }

    DataFrame::new(columns)
        .map_err(|e| ExtractError::unreadable(source, format!("Failed to create DataFrame: {e}")))
}

/// Casts `series` to `dtype`, failing when a value would be lost.
///
/// `strict_cast` only catches values that turn into nulls; float to integer casts
/// truncate silently, so those are cast back and compared.
fn cast_column(
    series: &Series,
    name: &str,
    dtype: &DataType,
    source: &Path,
) -> Result<Series, ExtractError> {
    let uncastable = |detail: String| {
        ExtractError::unreadable(
            source,
            format!("column '{name}' cannot be read as {dtype}: {detail}"),
        )
    };

    let cast = series
        .strict_cast(dtype)
        .map_err(|e| uncastable(e.to_string()))?;

    if series.dtype().is_float() && dtype.is_integer() {
        let round_trip = cast
            .cast(series.dtype())
            .map_err(|e| uncastable(e.to_string()))?;
        if !round_trip.equals_missing(series) {
            return Err(uncastable("fractional values would be truncated".into()));
        }
    }

    Ok(cast)
}
