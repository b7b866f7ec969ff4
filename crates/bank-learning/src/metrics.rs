//! Evaluation metrics for the held-out partition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LearningError, Result};

/// Precision, recall and F1 for one class (or an average over classes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Per-class scores of a binary classifier plus accuracy and averages.
///
/// Classes are listed in sorted label order. Any ratio with a zero
/// denominator is reported as 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub classes: Vec<(String, ClassMetrics)>,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

impl ClassificationReport {
    /// Score boolean predictions, naming `true` and `false` with the given labels.
    ///
    /// # Errors
    ///
    /// Returns [`LearningError::InvalidData`] if `y_true` and `y_pred` differ
    /// in length.
    pub fn from_predictions(
        y_true: &[bool],
        y_pred: &[bool],
        positive_label: &str,
        negative_label: &str,
    ) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(LearningError::InvalidData(format!(
                "{} true labels but {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }

        let total = y_true.len();
        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();

        let mut classes = vec![
            (
                negative_label.to_string(),
                class_metrics(y_true, y_pred, false),
            ),
            (
                positive_label.to_string(),
                class_metrics(y_true, y_pred, true),
            ),
        ];
        classes.sort_by(|a, b| a.0.cmp(&b.0));

        let n_classes = classes.len() as f64;
        let macro_avg = ClassMetrics {
            precision: classes.iter().map(|(_, m)| m.precision).sum::<f64>() / n_classes,
            recall: classes.iter().map(|(_, m)| m.recall).sum::<f64>() / n_classes,
            f1_score: classes.iter().map(|(_, m)| m.f1_score).sum::<f64>() / n_classes,
            support: total,
        };

        let weighted = |f: fn(&ClassMetrics) -> f64| {
            ratio(
                classes
                    .iter()
                    .map(|(_, m)| f(m) * m.support as f64)
                    .sum::<f64>(),
                total as f64,
            )
        };
        let weighted_avg = ClassMetrics {
            precision: weighted(|m| m.precision),
            recall: weighted(|m| m.recall),
            f1_score: weighted(|m| m.f1_score),
            support: total,
        };

        Ok(Self {
            accuracy: ratio(correct as f64, total as f64),
            classes,
            macro_avg,
            weighted_avg,
        })
    }

    /// Scores of the class named `label`.
    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, metrics)| metrics)
    }
}

fn class_metrics(y_true: &[bool], y_pred: &[bool], class: bool) -> ClassMetrics {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (t == class, p == class) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }

    let precision = ratio(tp as f64, (tp + fp) as f64);
    let recall = ratio(tp as f64, (tp + fn_) as f64);
    ClassMetrics {
        precision,
        recall,
        f1_score: ratio(2.0 * precision * recall, precision + recall),
        support: tp + fn_,
    }
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

const DIGITS: usize = 2;

/// Renders the report as a fixed-width text table.
///
/// ```text
///               precision    recall  f1-score   support
///
///           no       0.91      0.97      0.94       807
///          yes       0.56      0.30      0.39        98
///
///     accuracy                           0.89       905
///    macro avg       0.74      0.63      0.66       905
/// weighted avg       0.87      0.89      0.87       905
/// ```
impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|(name, _)| name.len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        let row = |f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics| {
            writeln!(
                f,
                "{:>width$}  {:>9.DIGITS$} {:>9.DIGITS$} {:>9.DIGITS$} {:>9}",
                name, m.precision, m.recall, m.f1_score, m.support
            )
        };

        for (name, metrics) in &self.classes {
            row(f, name, metrics)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.DIGITS$} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        row(f, "macro avg", &self.macro_avg)?;
        row(f, "weighted avg", &self.weighted_avg)
    }
}
