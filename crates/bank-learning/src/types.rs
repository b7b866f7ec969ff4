//! Common types used throughout the bank-learning crate.
//!
//! - [`TrainingResult`]: Complete result from [`Pipeline::train()`](crate::Pipeline::train)
//! - [`PredictionResult`]: Result from [`TrainedModel::predict_record()`](crate::TrainedModel::predict_record)
//! - [`ModelInfo`]: Metadata about a trained model

use serde::{Deserialize, Serialize};

use crate::metrics::ClassificationReport;

/// Result of a training pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct TrainingResult {
    /// Scores on the held-out partition.
    pub metrics: ClassificationReport,

    /// Rows used to fit the model.
    pub train_rows: usize,

    /// Rows held out for evaluation.
    pub test_rows: usize,

    /// Width of the transformed feature matrix.
    pub feature_count: usize,

    /// Total training time in seconds.
    ///
    /// Wall-clock time from start to finish, including the split,
    /// preprocessing and evaluation.
    pub training_time_seconds: f64,

    /// Non-fatal issues noticed during training, such as a class that is
    /// absent from the test partition.
    pub warnings: Vec<String>,
}

/// Result of a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The predicted class label.
    pub prediction: String,

    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
}

/// Information about a trained model.
///
/// Returned by [`TrainedModel::get_info()`](crate::TrainedModel::get_info).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ModelInfo {
    /// Name of the target column used during training.
    pub target_column: String,

    /// Names of the input columns in the order expected by the model.
    pub feature_names: Vec<String>,

    /// Width of the transformed feature matrix.
    pub n_features_out: usize,

    /// `[negative, positive]` class labels.
    pub class_labels: Vec<String>,

    /// Held-out accuracy recorded at training time.
    pub accuracy: f64,
}
