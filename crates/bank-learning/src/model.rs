//! The fitted model artifact.
//!
//! A [`TrainedModel`] bundles the fitted preprocessing transform with the
//! classifier weights, so raw client records go in and labelled
//! probabilities come out.
//!
//! # Creating a TrainedModel
//!
//! ```rust,ignore
//! // From training pipeline
//! let model = pipeline.create_trained_model()?;
//!
//! // From saved file
//! let model = TrainedModel::load("bank_marketing_model.json")?;
//!
//! // From bytes
//! let model = TrainedModel::from_bytes(&bytes)?;
//! ```
//!
//! # Serialization Formats
//!
//! | Method | Use Case |
//! |--------|----------|
//! | [`save()`](TrainedModel::save) / [`load()`](TrainedModel::load) | File-based persistence |
//! | [`to_bytes()`](TrainedModel::to_bytes) / [`from_bytes()`](TrainedModel::from_bytes) | In-memory transfer |
//!
//! Both produce pretty-printed JSON. The format carries no version.

use bank_processing::{ClientRecord, ColumnTransformer};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::classifier::{DECISION_THRESHOLD, LogisticClassifier};
use crate::error::{LearningError, Result};
use crate::metrics::ClassificationReport;
use crate::types::{ModelInfo, PredictionResult};

/// A trained preprocessing + classification pipeline.
///
/// Immutable once built. It holds no interior mutability, so a single
/// instance can be shared across threads behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    target_column: String,
    positive_label: String,
    negative_label: String,
    transformer: ColumnTransformer,
    classifier: LogisticClassifier,
    report: ClassificationReport,
}

static_assertions::assert_impl_all!(TrainedModel: Send, Sync);

impl TrainedModel {
    pub(crate) fn new(
        target_column: String,
        positive_label: String,
        negative_label: String,
        transformer: ColumnTransformer,
        classifier: LogisticClassifier,
        report: ClassificationReport,
    ) -> Self {
        Self {
            target_column,
            positive_label,
            negative_label,
            transformer,
            classifier,
            report,
        }
    }

    /// Loads a trained model from a JSON file written by [`save()`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist ([`LearningError::ModelNotFound`])
    /// - The file cannot be read ([`LearningError::Io`])
    /// - The content is not a model artifact ([`LearningError::Serialization`])
    /// - The transform and classifier disagree on the feature count ([`LearningError::InvalidData`])
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LearningError::ModelNotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = fs::read(path)?;
        let model = Self::from_bytes(&bytes)?;
        info!(
            "Loaded model from {} ({} input features)",
            path.display(),
            model.transformer.feature_names_in().len()
        );
        Ok(model)
    }

    /// Saves the model as pretty-printed JSON. Parent directories must exist.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes()?)?;
        debug!("Saved model to {}", path.display());
        Ok(())
    }

    /// Exports the model as a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Loads a model from bytes produced by [`to_bytes()`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model: Self = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let expected = self.transformer.n_features_out();
        let actual = self.classifier.n_features();
        if expected != actual {
            return Err(LearningError::InvalidData(format!(
                "transform produces {} features but classifier expects {}",
                expected, actual
            )));
        }
        Ok(())
    }

    /// Predict every row of a feature frame.
    ///
    /// The frame is first reindexed to the training columns: unknown columns
    /// are dropped and absent ones are treated as missing.
    pub fn predict_frame(&self, df: &DataFrame) -> Result<Vec<PredictionResult>> {
        let aligned = self.transformer.align(df)?;
        let matrix = self.transformer.transform(&aligned)?;
        let probabilities = self.classifier.predict_proba(matrix.view())?;

        probabilities
            .iter()
            .map(|&probability| self.to_prediction(probability))
            .collect()
    }

    /// Predict one validated client record.
    pub fn predict_record(&self, record: &ClientRecord) -> Result<PredictionResult> {
        let row = record.to_dataframe()?;
        self.predict_frame(&row)?.into_iter().next().ok_or_else(|| {
            LearningError::InferenceError("no prediction produced for record".to_string())
        })
    }

    fn to_prediction(&self, probability: f64) -> Result<PredictionResult> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LearningError::InferenceError(format!(
                "probability out of range: {}",
                probability
            )));
        }
        let prediction = if probability > DECISION_THRESHOLD {
            self.positive_label.clone()
        } else {
            self.negative_label.clone()
        };
        Ok(PredictionResult {
            prediction,
            probability,
        })
    }

    /// Input column names, in the order recorded at training time.
    pub fn feature_names(&self) -> &[String] {
        self.transformer.feature_names_in()
    }

    /// `[negative, positive]` class labels.
    pub fn class_labels(&self) -> [&str; 2] {
        [self.negative_label.as_str(), self.positive_label.as_str()]
    }

    /// Summary of the model for display.
    pub fn get_info(&self) -> ModelInfo {
        ModelInfo {
            target_column: self.target_column.clone(),
            feature_names: self.feature_names().to_vec(),
            n_features_out: self.transformer.n_features_out(),
            class_labels: self.class_labels().iter().map(|s| s.to_string()).collect(),
            accuracy: self.report.accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank_processing::TransformerConfig;
    use ndarray::Array1;
    use polars::prelude::*;

    fn tiny_model() -> TrainedModel {
        let features = df![
            "age" => [25.0f64, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0],
            "loan" => ["no", "yes", "no", "yes", "no", "no", "yes", "no"],
        ]
        .unwrap();
        let y = Array1::from(vec![false, false, false, true, false, true, true, true]);

        let config = TransformerConfig::builder()
            .numeric_features(["age"])
            .categorical_features(["loan"])
            .build()
            .unwrap();
        let (transformer, x) = ColumnTransformer::fit_transform(&features, &config).unwrap();
        let classifier = LogisticClassifier::fit(&x, &y, 1.0, 1000).unwrap();
        let predicted = classifier.predict(x.view()).unwrap();
        let report = ClassificationReport::from_predictions(
            y.as_slice().unwrap(),
            predicted.as_slice().unwrap(),
            "yes",
            "no",
        )
        .unwrap();

        TrainedModel::new(
            "y".to_string(),
            "yes".to_string(),
            "no".to_string(),
            transformer,
            classifier,
            report,
        )
    }

    #[test]
    fn test_predict_frame_labels_follow_threshold() {
        let model = tiny_model();
        let input = df![
            "age" => [22.0f64, 65.0],
            "loan" => ["no", "yes"],
        ]
        .unwrap();

        let predictions = model.predict_frame(&input).unwrap();
        assert_eq!(predictions.len(), 2);
        for p in &predictions {
            assert!((0.0..=1.0).contains(&p.probability));
            assert_eq!(p.prediction == "yes", p.probability > 0.5);
        }
        assert!(predictions[0].probability < predictions[1].probability);
    }

    #[test]
    fn test_bytes_round_trip() {
        let model = tiny_model();
        let restored = TrainedModel::from_bytes(&model.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = TrainedModel::from_bytes(b"{\"not\": \"a model\"}").unwrap_err();
        assert!(matches!(err, LearningError::Serialization(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TrainedModel::load("/no/such/model.json").unwrap_err();
        assert!(matches!(err, LearningError::ModelNotFound { .. }));
    }

    #[test]
    fn test_info() {
        let model = tiny_model();
        let info = model.get_info();
        assert_eq!(info.feature_names, vec!["age", "loan"]);
        assert_eq!(info.class_labels, vec!["no", "yes"]);
        assert_eq!(info.n_features_out, 3);
        assert_eq!(model.class_labels(), ["no", "yes"]);
    }
}
