//! Training and inference for the bank marketing term-deposit classifier.
//!
//! This crate fits a preprocessing transform plus an L2-regularized logistic
//! regression on the bank marketing dataset, reports held-out metrics, and
//! persists the result as a self-contained [`TrainedModel`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bank_learning::{Pipeline, TrainingConfig, TrainedModel};
//! use bank_processing::load_dataset;
//!
//! let df = load_dataset("bank.csv")?;
//!
//! let mut pipeline = Pipeline::builder()
//!     .config(TrainingConfig::default())
//!     .build();
//! let result = pipeline.train(&df)?;
//! println!("Model Accuracy: {}", result.metrics.accuracy);
//!
//! pipeline.create_trained_model()?.save("bank_marketing_model.json")?;
//!
//! // Later, in another process
//! let model = TrainedModel::load("bank_marketing_model.json")?;
//! let prediction = model.predict_record(&record)?;
//! ```

mod classifier;
mod config;
mod error;
mod metrics;
mod model;
mod pipeline;
mod progress;
mod types;

// Re-export public API
//
// Configuration types
pub use config::{TrainingConfig, TrainingConfigBuilder};
// Error types
pub use error::{LearningError, Result};
// Classifier and metrics
pub use classifier::{DECISION_THRESHOLD, LogisticClassifier};
pub use metrics::{ClassMetrics, ClassificationReport};
// Model types
pub use model::TrainedModel;
// Pipeline types
pub use pipeline::{Pipeline, PipelineBuilder};
// Progress reporting types
pub use progress::{ProgressCallback, ProgressUpdate, TrainingStage};
// Result types
pub use types::{ModelInfo, PredictionResult, TrainingResult};

/// Default file name of the persisted model.
pub const DEFAULT_MODEL_PATH: &str = "bank_marketing_model.json";
