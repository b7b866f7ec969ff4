//! Column-wise preprocessing of a feature frame into a dense matrix.
//!
//! Numeric columns go through median imputation and standardization;
//! categorical columns through constant imputation and one-hot expansion.
//! The output layout is all numeric columns in configured order followed by
//! the indicator blocks of each categorical column.

use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TransformerConfig;
use crate::error::{ProcessingError, Result, ResultExt};
use crate::imputers::{ConstantImputer, MedianImputer};
use crate::transform::{OneHotEncoder, StandardScaler};
use crate::utils::{numeric_values, string_values};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NumericColumn {
    imputer: MedianImputer,
    scaler: StandardScaler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CategoricalColumn {
    imputer: ConstantImputer,
    encoder: OneHotEncoder,
}

/// A fitted preprocessing transform.
///
/// Holds the input column names seen during fitting together with the fitted
/// state of every per-column stage. It is plain data: it can be serialized
/// with the model and shared across threads without synchronization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    feature_names_in: Vec<String>,
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
}

static_assertions::assert_impl_all!(ColumnTransformer: Send, Sync);

impl ColumnTransformer {
    /// Fit every stage on the columns of `df` named by `config`.
    ///
    /// `df` must contain features only; every column it has is recorded as
    /// an expected input, in frame order.
    pub fn fit(df: &DataFrame, config: &TransformerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ProcessingError::InvalidConfig(e.to_string()))?;

        if df.height() == 0 {
            return Err(ProcessingError::InvalidData(
                "cannot fit a transformer on an empty frame".to_string(),
            ));
        }

        let numeric = config
            .numeric_features
            .iter()
            .map(|name| {
                let imputer = MedianImputer::fit(df, name)?;
                let filled = imputer.transform(&numeric_values(df, name)?);
                let scaler = StandardScaler::fit(name, &filled)?;
                Ok(NumericColumn { imputer, scaler })
            })
            .collect::<Result<Vec<_>>>()
            .context("While fitting numeric features")?;

        let categorical = config
            .categorical_features
            .iter()
            .map(|name| {
                let imputer = ConstantImputer::new(config.categorical_fill_value.clone());
                let filled = imputer.transform(string_values(df, name)?);
                let encoder = OneHotEncoder::fit(name, &filled);
                debug!("'{}': {} categories", name, encoder.width());
                Ok(CategoricalColumn { imputer, encoder })
            })
            .collect::<Result<Vec<_>>>()
            .context("While fitting categorical features")?;

        let feature_names_in = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        Ok(Self {
            feature_names_in,
            numeric,
            categorical,
        })
    }

    /// Input columns recorded during fitting, in order.
    pub fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    /// Names of the transformed output columns, in matrix column order.
    pub fn feature_names_out(&self) -> Vec<String> {
        let numeric = self.numeric.iter().map(|c| c.imputer.column().to_string());
        let categorical = self
            .categorical
            .iter()
            .flat_map(|c| c.encoder.feature_names());
        numeric.chain(categorical).collect()
    }

    /// Width of the transformed matrix.
    pub fn n_features_out(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.encoder.width()).sum::<usize>()
    }

    /// Fitted one-hot encoder for a categorical column, if there is one.
    pub fn encoder(&self, column: &str) -> Option<&OneHotEncoder> {
        self.categorical
            .iter()
            .map(|c| &c.encoder)
            .find(|encoder| encoder.column() == column)
    }

    /// Reindex `df` to exactly the recorded input columns.
    ///
    /// Columns of `df` that were not seen during fitting are dropped. Recorded
    /// columns that `df` lacks are added as all-null, which the imputers fill.
    pub fn align(&self, df: &DataFrame) -> Result<DataFrame> {
        let height = df.height();
        let numeric_names: Vec<&str> = self.numeric.iter().map(|c| c.imputer.column()).collect();

        let columns = self
            .feature_names_in
            .iter()
            .map(|name| match df.column(name) {
                Ok(column) => column.clone(),
                Err(_) => {
                    debug!("Column '{}' absent from input; filling with nulls", name);
                    let dtype = if numeric_names.contains(&name.as_str()) {
                        DataType::Float64
                    } else {
                        DataType::String
                    };
                    Column::from(Series::full_null(name.as_str().into(), height, &dtype))
                }
            })
            .collect::<Vec<_>>();

        let dropped = df
            .get_column_names()
            .into_iter()
            .filter(|name| !self.feature_names_in.iter().any(|f| f == name.as_str()))
            .count();
        if dropped > 0 {
            debug!("Dropped {} column(s) not seen during fitting", dropped);
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Transform `df` into the dense feature matrix.
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err(ProcessingError::NotFitted("ColumnTransformer"));
        }

        let n_rows = df.height();
        let mut matrix = Array2::<f64>::zeros((n_rows, self.n_features_out()));

        for (col_idx, column) in self.numeric.iter().enumerate() {
            let raw = numeric_values(df, column.imputer.column())?;
            let filled = column.imputer.transform(&raw);
            for (row, value) in filled.into_iter().enumerate() {
                matrix[[row, col_idx]] = column.scaler.transform_value(value);
            }
        }

        let mut offset = self.numeric.len();
        for column in &self.categorical {
            let width = column.encoder.width();
            let filled = column
                .imputer
                .transform(string_values(df, column.encoder.column())?);
            for (row, value) in filled.iter().enumerate() {
                let mut row_view = matrix.row_mut(row);
                let block = row_view
                    .as_slice_mut()
                    .ok_or_else(|| ProcessingError::InvalidData("non-contiguous row".to_string()))?;
                column
                    .encoder
                    .encode_into(value, &mut block[offset..offset + width]);
            }
            offset += width;
        }

        Ok(matrix)
    }

    /// Fit on `df` and transform it in one step.
    pub fn fit_transform(df: &DataFrame, config: &TransformerConfig) -> Result<(Self, Array2<f64>)> {
        let transformer = Self::fit(df, config)?;
        let matrix = transformer.transform(df)?;
        Ok((transformer, matrix))
    }
}
