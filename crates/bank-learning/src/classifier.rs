//! Binary logistic regression over the transformed feature matrix.
//!
//! Fitting is delegated to `linfa-logistic`. The fitted weights are copied
//! out into a plain serializable struct, so inference is a dot product and a
//! sigmoid with no solver state kept around.

use linfa::prelude::*;
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LearningError, Result};

/// Probability above which a row is assigned to the positive class.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Fitted weights of an L2-regularized logistic regression.
///
/// `predict_proba` returns the probability of the positive class, i.e. of
/// the `true` targets seen during fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LogisticClassifier {
    /// Fit on `x` with boolean targets `y`.
    ///
    /// `alpha` is the L2 penalty and `max_iterations` bounds the solver.
    pub fn fit(
        x: &Array2<f64>,
        y: &Array1<bool>,
        alpha: f64,
        max_iterations: u64,
    ) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(LearningError::InvalidData(format!(
                "{} feature rows but {} targets",
                x.nrows(),
                y.len()
            )));
        }

        let positives = y.iter().filter(|&&v| v).count();
        if positives == 0 || positives == y.len() {
            return Err(LearningError::TrainingFailed(
                "training data contains a single class".to_string(),
            ));
        }

        let dataset = Dataset::new(x.clone(), y.clone());
        let fitted = LogisticRegression::default()
            .alpha(alpha)
            .max_iterations(max_iterations)
            .with_intercept(true)
            .fit(&dataset)
            .map_err(|e| LearningError::TrainingFailed(e.to_string()))?;

        // linfa picks its own positive class; flip the weights if it chose `false`.
        let sign = if fitted.labels().pos.class { 1.0 } else { -1.0 };
        let intercept = sign * fitted.intercept();
        let coefficients: Vec<f64> = fitted.params().iter().map(|w| sign * w).collect();

        if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(LearningError::TrainingFailed(
                "solver produced non-finite weights".to_string(),
            ));
        }

        debug!(
            "Fitted logistic regression: {} coefficients, intercept {:.4}",
            coefficients.len(),
            intercept
        );

        Ok(Self {
            intercept,
            coefficients,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Number of features the classifier expects.
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Positive-class probability of a single row.
    pub fn predict_proba_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let z = self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();
        sigmoid(z)
    }

    /// Positive-class probability of every row of `x`.
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features() {
            return Err(LearningError::InferenceError(format!(
                "expected {} features, got {}",
                self.n_features(),
                x.ncols()
            )));
        }
        Ok(x.rows()
            .into_iter()
            .map(|row| self.predict_proba_row(row))
            .collect())
    }

    /// Class decision for every row of `x`: `true` iff probability > 0.5.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<bool>> {
        Ok(self.predict_proba(x)?.mapv(|p| p > DECISION_THRESHOLD))
    }
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable() -> (Array2<f64>, Array1<bool>) {
        let x = array![
            [-2.0, 0.1],
            [-1.5, -0.3],
            [-1.0, 0.4],
            [-0.5, -0.2],
            [0.5, 0.3],
            [1.0, -0.1],
            [1.5, 0.2],
            [2.0, -0.4],
        ];
        let y = array![false, false, false, true, false, true, true, true];
        (x, y)
    }

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }

    #[test]
    fn test_fit_learns_direction() {
        let (x, y) = separable();
        let model = LogisticClassifier::fit(&x, &y, 1.0, 1000).unwrap();

        assert_eq!(model.n_features(), 2);
        assert!(model.coefficients()[0] > 0.0);

        let proba = model.predict_proba(x.view()).unwrap();
        assert!(proba[0] < 0.5);
        assert!(proba[7] > 0.5);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_matches_linfa_probabilities() {
        let (x, y) = separable();
        let model = LogisticClassifier::fit(&x, &y, 1.0, 1000).unwrap();

        let fitted = LogisticRegression::default()
            .alpha(1.0)
            .max_iterations(1000)
            .fit(&Dataset::new(x.clone(), y.clone()))
            .unwrap();
        let reference = fitted.predict_probabilities(&x);
        let positive_is_true = fitted.labels().pos.class;

        let ours = model.predict_proba(x.view()).unwrap();
        for (a, b) in ours.iter().zip(reference.iter()) {
            let b = if positive_is_true { *b } else { 1.0 - *b };
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_predict_uses_threshold() {
        let (x, y) = separable();
        let model = LogisticClassifier::fit(&x, &y, 1.0, 1000).unwrap();
        let proba = model.predict_proba(x.view()).unwrap();
        let labels = model.predict(x.view()).unwrap();
        for (p, label) in proba.iter().zip(labels.iter()) {
            assert_eq!(*label, *p > 0.5);
        }
    }

    #[test]
    fn test_single_class_fails() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![true, true, true];
        let err = LogisticClassifier::fit(&x, &y, 1.0, 100).unwrap_err();
        assert!(matches!(err, LearningError::TrainingFailed(_)));
    }

    #[test]
    fn test_feature_count_mismatch() {
        let (x, y) = separable();
        let model = LogisticClassifier::fit(&x, &y, 1.0, 1000).unwrap();
        let err = model.predict_proba(array![[1.0, 2.0, 3.0]].view()).unwrap_err();
        assert!(matches!(err, LearningError::InferenceError(_)));
    }
}
