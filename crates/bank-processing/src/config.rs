//! Configuration for the column transformer.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults describe the bank marketing schema, so most callers only
//! need [`TransformerConfig::default()`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::schema::{CATEGORICAL_FEATURES, MISSING_CATEGORY, NUMERIC_FEATURES};

/// Configuration for [`ColumnTransformer`](crate::ColumnTransformer).
///
/// # Example
///
/// ```rust,ignore
/// use bank_processing::TransformerConfig;
///
/// let config = TransformerConfig::builder()
///     .numeric_features(["age", "balance"])
///     .categorical_features(["job"])
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerConfig {
    /// Columns that are median-imputed and standardized.
    /// Default: the 7 numeric bank marketing features
    pub numeric_features: Vec<String>,

    /// Columns that are constant-imputed and one-hot encoded.
    /// Default: the 9 categorical bank marketing features
    pub categorical_features: Vec<String>,

    /// Fill value for missing categorical entries.
    /// Default: "unknown"
    pub categorical_fill_value: String,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            numeric_features: NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect(),
            categorical_features: CATEGORICAL_FEATURES.iter().map(|s| s.to_string()).collect(),
            categorical_fill_value: MISSING_CATEGORY.to_string(),
        }
    }
}

impl TransformerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> TransformerConfigBuilder {
        TransformerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.numeric_features.is_empty() && self.categorical_features.is_empty() {
            return Err(ConfigValidationError::NoFeatures);
        }

        let mut seen = HashSet::new();
        for name in self
            .numeric_features
            .iter()
            .chain(self.categorical_features.iter())
        {
            if !seen.insert(name.as_str()) {
                return Err(ConfigValidationError::DuplicateFeature(name.clone()));
            }
        }

        if self.categorical_fill_value.is_empty() {
            return Err(ConfigValidationError::EmptyFillValue);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("At least one numeric or categorical feature is required")]
    NoFeatures,

    #[error("Feature '{0}' is listed more than once")]
    DuplicateFeature(String),

    #[error("Categorical fill value must not be empty")]
    EmptyFillValue,
}

/// Builder for [`TransformerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct TransformerConfigBuilder {
    numeric_features: Option<Vec<String>>,
    categorical_features: Option<Vec<String>>,
    categorical_fill_value: Option<String>,
}

impl TransformerConfigBuilder {
    /// Set the numeric feature columns.
    pub fn numeric_features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_features = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the categorical feature columns.
    pub fn categorical_features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical_features = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the fill value for missing categorical entries.
    pub fn categorical_fill_value(mut self, value: impl Into<String>) -> Self {
        self.categorical_fill_value = Some(value.into());
        self
    }

    /// Build the configuration, validating all settings.
    pub fn build(self) -> Result<TransformerConfig, ConfigValidationError> {
        let defaults = TransformerConfig::default();
        let config = TransformerConfig {
            numeric_features: self.numeric_features.unwrap_or(defaults.numeric_features),
            categorical_features: self
                .categorical_features
                .unwrap_or(defaults.categorical_features),
            categorical_fill_value: self
                .categorical_fill_value
                .unwrap_or(defaults.categorical_fill_value),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformerConfig::default();
        assert_eq!(config.numeric_features.len(), 7);
        assert_eq!(config.categorical_features.len(), 9);
        assert_eq!(config.categorical_fill_value, "unknown");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = TransformerConfig::builder()
            .numeric_features(["age"])
            .categorical_features(["job", "marital"])
            .categorical_fill_value("missing")
            .build()
            .unwrap();

        assert_eq!(config.numeric_features, vec!["age"]);
        assert_eq!(config.categorical_features, vec!["job", "marital"]);
        assert_eq!(config.categorical_fill_value, "missing");
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let result = TransformerConfig::builder()
            .numeric_features(["age"])
            .categorical_features(["age"])
            .build();
        assert!(matches!(
            result,
            Err(ConfigValidationError::DuplicateFeature(ref name)) if name == "age"
        ));
    }

    #[test]
    fn test_no_features_rejected() {
        let result = TransformerConfig::builder()
            .numeric_features(Vec::<String>::new())
            .categorical_features(Vec::<String>::new())
            .build();
        assert!(matches!(result, Err(ConfigValidationError::NoFeatures)));
    }

    #[test]
    fn test_empty_fill_value_rejected() {
        let result = TransformerConfig::builder().categorical_fill_value("").build();
        assert!(result.unwrap_err().to_string().contains("fill value"));
    }
}
