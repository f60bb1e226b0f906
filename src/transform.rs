use crate::constants::COL_PRICE;
use crate::errors::{AppError, AppResult};
use crate::utils::round_two_decimals;
use polars::prelude::*;

/// Rounds every `price` to two decimals in place and hands the table back.
///
/// Nulls stay null. Applying it twice gives the same prices as applying it once.
///
/// # Errors
///
/// Returns `DataFrameError` if the table has no `price` column or it is not `Float64`.
pub fn round_prices(table: &mut DataFrame) -> AppResult<&mut DataFrame> {
    let rounded: Vec<Option<f64>> = table
        .column(COL_PRICE)
        .and_then(|column| column.f64())
        .map_err(|e| AppError::DataFrameError(format!("Cannot round prices: {e}")))?
        .into_iter()
        .map(|price| price.map(round_two_decimals))
        .collect();

    table.with_column(Series::new(COL_PRICE, rounded))?;
    Ok(table)
}
