//! Error types for the bank-learning crate.
//!
//! This module defines [`LearningError`], the main error type used throughout
//! the crate. All public API functions return `Result<T, LearningError>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use bank_learning::{LearningError, TrainingConfig};
//!
//! fn configure() -> Result<(), LearningError> {
//!     // Errors are automatically propagated with ?
//!     let config = TrainingConfig::builder().test_size(0.25).build()?;
//!     Ok(())
//! }
//! ```

use bank_processing::ProcessingError;
use thiserror::Error;

/// The main error type for training and inference.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// without breaking downstream code.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LearningError {
    /// Invalid configuration provided to the pipeline.
    ///
    /// Check the error message for details on which configuration value is invalid
    /// and what values are accepted.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data provided for training or inference.
    ///
    /// Common causes:
    /// - The target column holds a label other than the two configured classes
    /// - The frame is too small to split
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The specified target column was not found in the DataFrame.
    ///
    /// Column names are case-sensitive.
    #[error("Target column '{0}' not found")]
    TargetNotFound(String),

    /// The solver could not produce a model.
    #[error("Training failed: {0}")]
    TrainingFailed(String),

    /// The specified model file was not found.
    #[error("Model not found: {path}")]
    ModelNotFound {
        /// The path that was not found.
        path: String,
    },

    /// An error occurred during inference/prediction.
    #[error("Inference error: {0}")]
    InferenceError(String),

    /// A preprocessing stage failed.
    #[error("Preprocessing error: {0}")]
    Processing(#[from] ProcessingError),

    /// I/O error during file operations.
    ///
    /// This wraps standard I/O errors that occur during model save/load operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The model artifact could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<polars::error::PolarsError> for LearningError {
    fn from(err: polars::error::PolarsError) -> Self {
        LearningError::Processing(ProcessingError::Polars(err))
    }
}

impl LearningError {
    /// Stable machine-readable code for this error.
    ///
    /// Preprocessing failures report the code of the underlying
    /// [`ProcessingError`].
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::TargetNotFound(_) => "TARGET_NOT_FOUND",
            Self::TrainingFailed(_) => "TRAINING_FAILED",
            Self::ModelNotFound { .. } => "MODEL_NOT_FOUND",
            Self::InferenceError(_) => "INFERENCE_ERROR",
            Self::Processing(e) => e.error_code(),
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Result type alias for training and inference operations.
pub type Result<T> = std::result::Result<T, LearningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            LearningError::TargetNotFound("y".to_string()).to_string(),
            "Target column 'y' not found"
        );
        assert_eq!(
            LearningError::ModelNotFound {
                path: "model.json".to_string()
            }
            .to_string(),
            "Model not found: model.json"
        );
    }

    #[test]
    fn test_processing_errors_convert() {
        let err: LearningError = ProcessingError::ColumnNotFound("age".to_string()).into();
        assert!(matches!(err, LearningError::Processing(_)));
        assert!(err.to_string().contains("age"));
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LearningError::InferenceError("nan".to_string()).error_code(),
            "INFERENCE_ERROR"
        );
        let nested: LearningError = ProcessingError::NotFitted("ColumnTransformer")
            .with_context("While transforming request")
            .into();
        assert_eq!(nested.error_code(), "NOT_FITTED");
    }
}
