//! Statistical imputation methods.
//!
//! Each imputer is fitted once on the training partition and then applied
//! unchanged to every later input, so the fill values travel with the model.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::utils::numeric_values;

/// Fills missing numeric values with the training median of the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedianImputer {
    column: String,
    median: f64,
}

impl MedianImputer {
    /// Fit the imputer on one numeric column of `df`.
    ///
    /// Nulls and NaN are ignored when computing the median. A column without
    /// any usable value cannot be fitted.
    pub fn fit(df: &DataFrame, column: &str) -> Result<Self> {
        let values = numeric_values(df, column)?;
        let series = Series::new(column.into(), values);

        let median = series
            .median()
            .ok_or_else(|| ProcessingError::NoValidValues(column.to_string()))?;

        debug!("Median for '{}': {:.2}", column, median);

        Ok(Self {
            column: column.to_string(),
            median,
        })
    }

    /// The column this imputer was fitted on.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The fitted fill value.
    pub fn median(&self) -> f64 {
        self.median
    }

    /// Replace every missing value with the fitted median.
    pub fn transform(&self, values: &[Option<f64>]) -> Vec<f64> {
        values
            .iter()
            .map(|value| value.unwrap_or(self.median))
            .collect()
    }
}

/// Fills missing categorical values with a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantImputer {
    fill_value: String,
}

impl ConstantImputer {
    pub fn new(fill_value: impl Into<String>) -> Self {
        Self {
            fill_value: fill_value.into(),
        }
    }

    pub fn fill_value(&self) -> &str {
        &self.fill_value
    }

    /// Replace every missing value with the constant.
    pub fn transform(&self, values: Vec<Option<String>>) -> Vec<String> {
        values
            .into_iter()
            .map(|value| value.unwrap_or_else(|| self.fill_value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // MedianImputer tests
    // ========================================================================

    #[test]
    fn test_median_imputer_basic() {
        let df = df![
            "values" => [Some(1.0), None, Some(3.0), None, Some(5.0)],
        ]
        .unwrap();

        let imputer = MedianImputer::fit(&df, "values").unwrap();

        // Median of [1, 3, 5] = 3
        assert_eq!(imputer.median(), 3.0);
        assert_eq!(
            imputer.transform(&[Some(1.0), None, Some(5.0)]),
            vec![1.0, 3.0, 5.0]
        );
    }

    #[test]
    fn test_median_imputer_even_count_interpolates() {
        let df = df!["values" => [1i64, 2, 3, 10]].unwrap();
        let imputer = MedianImputer::fit(&df, "values").unwrap();
        assert_eq!(imputer.median(), 2.5);
    }

    #[test]
    fn test_median_imputer_ignores_nan() {
        let df = df!["values" => [f64::NAN, 4.0, 8.0]].unwrap();
        let imputer = MedianImputer::fit(&df, "values").unwrap();
        assert_eq!(imputer.median(), 6.0);
    }

    #[test]
    fn test_median_imputer_all_nulls() {
        let df = df![
            "values" => [Option::<f64>::None, None, None],
        ]
        .unwrap();

        let err = MedianImputer::fit(&df, "values").unwrap_err();
        assert!(matches!(err, ProcessingError::NoValidValues(ref c) if c == "values"));
    }

    #[test]
    fn test_median_imputer_nonexistent_column() {
        let df = df!["other" => [1.0, 2.0, 3.0]].unwrap();
        let err = MedianImputer::fit(&df, "values").unwrap_err();
        assert!(matches!(err, ProcessingError::ColumnNotFound(_)));
    }

    // ========================================================================
    // ConstantImputer tests
    // ========================================================================

    #[test]
    fn test_constant_imputer_fills_only_missing() {
        let imputer = ConstantImputer::new("unknown");
        let filled = imputer.transform(vec![Some("married".to_string()), None]);
        assert_eq!(filled, vec!["married".to_string(), "unknown".to_string()]);
    }
}
