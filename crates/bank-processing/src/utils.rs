//! Shared utilities for reading typed values out of polars frames.
//!
//! The fit/transform stages work on plain vectors; these helpers are the one
//! place where polars columns are cast and unpacked.

use polars::prelude::*;

use crate::error::{ProcessingError, Result};

// =============================================================================
// Column Extraction Utilities
// =============================================================================

/// Look up a column as a materialized Series.
pub fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|column| column.as_materialized_series())
        .map_err(|_| ProcessingError::ColumnNotFound(name.to_string()))
}

/// Read a column as optional floats.
///
/// Values that cannot be cast to a float become `None`, and so does NaN:
/// both count as missing for imputation.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column_series(df, name)?.cast(&DataType::Float64)?;
    let values = series
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect();
    Ok(values)
}

/// Read a column as optional strings. Non-string columns are stringified.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column_series(df, name)?;
    let series = if matches!(series.dtype(), DataType::String) {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };
    let values = series
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

// =============================================================================
// Statistics Utilities
// =============================================================================

/// Mean and population standard deviation (ddof = 0) of a slice.
///
/// Returns `None` for an empty slice.
pub fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

// =============================================================================
// Tests
// =============================================================================
