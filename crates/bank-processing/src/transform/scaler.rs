//! Standardization of numeric columns.

use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::utils::mean_and_std;

/// Rescales a column to zero mean and unit variance.
///
/// Uses the population standard deviation. A constant column keeps a scale
/// of 1.0 so it is only centered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: f64,
    scale: f64,
}

impl StandardScaler {
    /// Fit on already-imputed values of `column`.
    pub fn fit(column: &str, values: &[f64]) -> Result<Self> {
        let (mean, std) =
            mean_and_std(values).ok_or_else(|| ProcessingError::NoValidValues(column.to_string()))?;
        let scale = if std == 0.0 { 1.0 } else { std };
        Ok(Self { mean, scale })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn transform_value(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform_value(v)).collect()
    }
}
