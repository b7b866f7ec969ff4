//! Training pipeline implementation.
//!
//! This module provides the [`Pipeline`] struct and its builder. The
//! pipeline executes these stages in order:
//!
//! 1. **Splitting** - Seeded shuffle into train and test partitions
//! 2. **Preprocessing** - Fit imputers, scalers and one-hot encoders on the train rows
//! 3. **Training** - Fit the logistic regression on the transformed matrix
//! 4. **Evaluation** - Score the held-out rows once
//!
//! # Example
//!
//! ```rust,ignore
//! use bank_learning::{Pipeline, TrainingConfig};
//!
//! let mut pipeline = Pipeline::builder()
//!     .config(TrainingConfig::default())
//!     .on_progress(|update| {
//!         println!("[{:?}] {:.0}% - {}", update.stage, update.progress * 100.0, update.message);
//!     })
//!     .build();
//!
//! let result = pipeline.train(&dataframe)?;
//! println!("Accuracy: {:.3}", result.metrics.accuracy);
//!
//! let model = pipeline.create_trained_model()?;
//! model.save("bank_marketing_model.json")?;
//! ```

use bank_processing::utils::string_values;
use bank_processing::{ColumnTransformer, split_target, train_test_split};
use ndarray::Array1;
use polars::prelude::{DataFrame, Series};
use std::time::Instant;
use tracing::{info, warn};

use crate::classifier::LogisticClassifier;
use crate::config::TrainingConfig;
use crate::error::{LearningError, Result};
use crate::metrics::ClassificationReport;
use crate::model::TrainedModel;
use crate::progress::{ProgressCallback, ProgressUpdate, TrainingStage};
use crate::types::TrainingResult;

/// The training pipeline.
///
/// Use [`Pipeline::builder()`] to construct a pipeline with the builder pattern.
///
/// # Lifecycle
///
/// 1. Create a pipeline with [`Pipeline::builder()`]
/// 2. Call [`train()`](Self::train) with your data
/// 3. Call [`create_trained_model()`](Self::create_trained_model) to get a model for inference
pub struct Pipeline {
    config: TrainingConfig,
    progress_callback: Option<ProgressCallback>,
    last_model: Option<TrainedModel>,
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .field("trained", &self.last_model.is_some())
            .finish()
    }
}

impl Pipeline {
    /// Create a new builder for `Pipeline`.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Run the training pipeline on the provided DataFrame.
    ///
    /// `df` must hold the target column and every configured feature column.
    /// Any other column is carried along as an expected input of the model.
    ///
    /// # Errors
    ///
    /// - [`TargetNotFound`](LearningError::TargetNotFound): target column missing
    /// - [`InvalidData`](LearningError::InvalidData): unknown labels or too few rows
    /// - [`Processing`](LearningError::Processing): a feature column is missing or unusable
    /// - [`TrainingFailed`](LearningError::TrainingFailed): the solver failed or only one class is present
    pub fn train(&mut self, df: &DataFrame) -> Result<TrainingResult> {
        let started = Instant::now();
        let config = &self.config;
        let mut warnings = Vec::new();

        self.report(TrainingStage::Initializing, 0.0, "Validating training data");
        if df.column(&config.target_column).is_err() {
            return Err(LearningError::TargetNotFound(config.target_column.clone()));
        }

        self.report(TrainingStage::Splitting, 0.1, "Splitting train and test rows");
        let split = train_test_split(df, config.test_size, config.random_seed)?;
        let (train_x, train_labels) = split_target(&split.train, &config.target_column)?;
        let (test_x, test_labels) = split_target(&split.test, &config.target_column)?;
        let train_y = encode_target(&train_labels, config)?;
        let test_y = encode_target(&test_labels, config)?;
        info!(
            "Split {} rows: {} train / {} test",
            df.height(),
            train_x.height(),
            test_x.height()
        );

        self.report(TrainingStage::Preprocessing, 0.3, "Fitting preprocessing transform");
        let (transformer, train_matrix) =
            ColumnTransformer::fit_transform(&train_x, &config.transformer)?;
        let test_matrix = transformer.transform(&test_x)?;

        self.report(TrainingStage::Training, 0.5, "Fitting logistic regression");
        let classifier = LogisticClassifier::fit(
            &train_matrix,
            &train_y,
            config.alpha(),
            config.max_iterations,
        )?;

        self.report(TrainingStage::Evaluation, 0.8, "Evaluating on held-out rows");
        let predicted = classifier.predict(test_matrix.view())?;
        let metrics = ClassificationReport::from_predictions(
            &test_y.to_vec(),
            &predicted.to_vec(),
            &config.positive_label,
            &config.negative_label,
        )?;
        for (label, class) in &metrics.classes {
            if class.support == 0 {
                let message = format!("class '{}' does not occur in the test partition", label);
                warn!("{}", message);
                warnings.push(message);
            }
        }
        info!("Held-out accuracy: {:.4}", metrics.accuracy);

        let result = TrainingResult {
            metrics: metrics.clone(),
            train_rows: train_x.height(),
            test_rows: test_x.height(),
            feature_count: transformer.n_features_out(),
            training_time_seconds: started.elapsed().as_secs_f64(),
            warnings,
        };

        self.last_model = Some(TrainedModel::new(
            config.target_column.clone(),
            config.positive_label.clone(),
            config.negative_label.clone(),
            transformer,
            classifier,
            metrics,
        ));

        self.report(TrainingStage::Complete, 1.0, "Training complete");
        Ok(result)
    }

    /// Return the model fitted by the last [`train()`](Self::train) call.
    ///
    /// # Errors
    ///
    /// Returns [`LearningError::InvalidConfig`] if [`train()`](Self::train) has not been called yet.
    pub fn create_trained_model(&self) -> Result<TrainedModel> {
        self.last_model.clone().ok_or_else(|| {
            LearningError::InvalidConfig(
                "No training result available. Call train() first.".to_string(),
            )
        })
    }

    /// Get the pipeline configuration.
    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Returns `true` if training has been completed and a model is available.
    #[must_use]
    pub fn has_training_result(&self) -> bool {
        self.last_model.is_some()
    }

    fn report(&self, stage: TrainingStage, progress: f64, message: &str) {
        if let Some(callback) = &self.progress_callback {
            callback(ProgressUpdate {
                stage,
                progress,
                message: message.to_string(),
            });
        }
    }
}

/// Map target labels to booleans, `true` for the positive label.
fn encode_target(labels: &Series, config: &TrainingConfig) -> Result<Array1<bool>> {
    let frame = DataFrame::new(vec![labels.clone().into()])?;
    string_values(&frame, labels.name().as_str())?
        .into_iter()
        .map(|label| match label.as_deref() {
            Some(l) if l == config.positive_label => Ok(true),
            Some(l) if l == config.negative_label => Ok(false),
            Some(other) => Err(LearningError::InvalidData(format!(
                "unexpected label '{}' in column '{}'",
                other, config.target_column
            ))),
            None => Err(LearningError::InvalidData(format!(
                "missing label in column '{}'",
                config.target_column
            ))),
        })
        .collect()
}

/// Builder for [`Pipeline`].
///
/// Created via [`Pipeline::builder()`]. Without [`config()`](Self::config)
/// the default [`TrainingConfig`] is used.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<TrainingConfig>,
    progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("config", &self.config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl PipelineBuilder {
    /// Set the training configuration.
    #[must_use]
    pub fn config(mut self, config: TrainingConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the progress callback (optional).
    ///
    /// The callback will be invoked with [`ProgressUpdate`] structs during
    /// training to report current status. It runs on the training thread, so
    /// it should return quickly.
    #[must_use]
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_callback = Some(std::sync::Arc::new(callback));
        self
    }

    /// Build the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config.unwrap_or_default(),
            progress_callback: self.progress_callback,
            last_model: None,
        }
    }
}
