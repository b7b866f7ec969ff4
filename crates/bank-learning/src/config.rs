//! Configuration for the training pipeline.
//!
//! This module provides [`TrainingConfig`] and its builder. Defaults
//! reproduce the reference training run: an 80/20 split seeded with 42 and
//! an L2-regularized logistic regression with `C = 1.0` and up to 1000
//! solver iterations.
//!
//! # Example
//!
//! ```
//! use bank_learning::TrainingConfig;
//!
//! let config = TrainingConfig::builder()
//!     .test_size(0.25)
//!     .random_seed(7)
//!     .build()
//!     .expect("valid config");
//! ```

use bank_processing::TransformerConfig;
use bank_processing::schema::{NEGATIVE_LABEL, POSITIVE_LABEL, TARGET_COLUMN};
use serde::{Deserialize, Serialize};

use crate::error::LearningError;

/// Configuration for the training pipeline.
///
/// Use [`TrainingConfig::builder()`] to construct a configuration with the builder pattern.
///
/// # Validation
///
/// The builder validates the following constraints on [`build()`](TrainingConfigBuilder::build):
/// - `test_size` must be in range `(0.0, 1.0)` (exclusive)
/// - `max_iterations` must be at least 1
/// - `regularization` must be positive and finite
/// - both labels must be non-empty and distinct
/// - the transformer configuration must itself be valid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Name of the label column (default: "y").
    pub target_column: String,

    /// Label of the class whose probability is reported (default: "yes").
    pub positive_label: String,

    /// The other label (default: "no").
    pub negative_label: String,

    /// Fraction of rows held out for evaluation (default: 0.2).
    pub test_size: f64,

    /// Seed of the row shuffle (default: 42).
    pub random_seed: u64,

    /// Upper bound on solver iterations (default: 1000).
    pub max_iterations: u64,

    /// Inverse regularization strength `C` (default: 1.0).
    ///
    /// The solver is given an L2 penalty of `1 / C`.
    pub regularization: f64,

    /// Which columns are numeric and which are categorical.
    pub transformer: TransformerConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            target_column: TARGET_COLUMN.to_string(),
            positive_label: POSITIVE_LABEL.to_string(),
            negative_label: NEGATIVE_LABEL.to_string(),
            test_size: 0.2,
            random_seed: 42,
            max_iterations: 1000,
            regularization: 1.0,
            transformer: TransformerConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Create a new builder for `TrainingConfig`.
    #[must_use]
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }

    /// L2 penalty handed to the solver.
    pub fn alpha(&self) -> f64 {
        1.0 / self.regularization
    }
}

/// Builder for [`TrainingConfig`].
///
/// Created via [`TrainingConfig::builder()`]. All setters return `self` to allow
/// method chaining.
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Set the target column name.
    #[must_use]
    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.config.target_column = column.into();
        self
    }

    /// Set the positive and negative class labels.
    #[must_use]
    pub fn labels(mut self, positive: impl Into<String>, negative: impl Into<String>) -> Self {
        self.config.positive_label = positive.into();
        self.config.negative_label = negative.into();
        self
    }

    /// Set the test size fraction (default: 0.2).
    ///
    /// [`build()`](Self::build) will return an error if `size <= 0.0` or `size >= 1.0`.
    #[must_use]
    pub fn test_size(mut self, size: f64) -> Self {
        self.config.test_size = size;
        self
    }

    /// Set the random seed for reproducibility (default: 42).
    #[must_use]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Set the solver iteration cap (default: 1000).
    #[must_use]
    pub fn max_iterations(mut self, iterations: u64) -> Self {
        self.config.max_iterations = iterations;
        self
    }

    /// Set the inverse regularization strength `C` (default: 1.0).
    #[must_use]
    pub fn regularization(mut self, c: f64) -> Self {
        self.config.regularization = c;
        self
    }

    /// Replace the column configuration of the preprocessing transform.
    #[must_use]
    pub fn transformer(mut self, transformer: TransformerConfig) -> Self {
        self.config.transformer = transformer;
        self
    }

    /// Build the configuration, validating all settings.
    ///
    /// # Errors
    ///
    /// Returns [`LearningError::InvalidConfig`] naming the first setting out
    /// of range.
    pub fn build(self) -> Result<TrainingConfig, LearningError> {
        let config = self.config;

        if !(config.test_size > 0.0 && config.test_size < 1.0) {
            return Err(LearningError::InvalidConfig(
                "test_size must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }

        if config.max_iterations == 0 {
            return Err(LearningError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if !(config.regularization.is_finite() && config.regularization > 0.0) {
            return Err(LearningError::InvalidConfig(
                "regularization must be a positive number".to_string(),
            ));
        }

        if config.target_column.is_empty() {
            return Err(LearningError::InvalidConfig(
                "target_column must not be empty".to_string(),
            ));
        }

        if config.positive_label.is_empty() || config.negative_label.is_empty() {
            return Err(LearningError::InvalidConfig(
                "class labels must not be empty".to_string(),
            ));
        }

        if config.positive_label == config.negative_label {
            return Err(LearningError::InvalidConfig(
                "class labels must be distinct".to_string(),
            ));
        }

        config
            .transformer
            .validate()
            .map_err(|e| LearningError::InvalidConfig(e.to_string()))?;

        Ok(config)
    }
}
