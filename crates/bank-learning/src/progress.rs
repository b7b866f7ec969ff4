//! Progress reporting types for the training pipeline.
//!
//! This module defines [`TrainingStage`], [`ProgressUpdate`], and the
//! [`ProgressCallback`] type alias.
//!
//! # Example
//!
//! ```
//! use bank_learning::{Pipeline, ProgressUpdate};
//!
//! let pipeline = Pipeline::builder()
//!     .on_progress(|update: ProgressUpdate| {
//!         println!(
//!             "[{:?}] {:.0}% - {}",
//!             update.stage,
//!             update.progress * 100.0,
//!             update.message
//!         );
//!     })
//!     .build();
//! ```

use std::fmt;
use std::sync::Arc;

/// The current stage of the training pipeline.
///
/// Training progresses through these stages in order:
///
/// 1. [`Initializing`](Self::Initializing) - Validating the input frame
/// 2. [`Splitting`](Self::Splitting) - Partitioning rows into train and test
/// 3. [`Preprocessing`](Self::Preprocessing) - Fitting imputers, scalers and encoders
/// 4. [`Training`](Self::Training) - Fitting the logistic regression
/// 5. [`Evaluation`](Self::Evaluation) - Scoring the held-out partition
/// 6. [`Complete`](Self::Complete) - Training finished successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[non_exhaustive]
pub enum TrainingStage {
    #[default]
    Initializing,
    Splitting,
    Preprocessing,
    Training,
    Evaluation,
    Complete,
}

impl TrainingStage {
    /// Returns the snake_case name of the stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use bank_learning::TrainingStage;
    ///
    /// assert_eq!(TrainingStage::Training.as_str(), "training");
    /// ```
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStage::Initializing => "initializing",
            TrainingStage::Splitting => "splitting",
            TrainingStage::Preprocessing => "preprocessing",
            TrainingStage::Training => "training",
            TrainingStage::Evaluation => "evaluation",
            TrainingStage::Complete => "complete",
        }
    }
}

impl fmt::Display for TrainingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A progress update from the training pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressUpdate {
    /// The current training stage.
    pub stage: TrainingStage,

    /// Overall progress from 0.0 to 1.0. Never decreases within one run.
    pub progress: f64,

    /// Human-readable status message.
    pub message: String,
}

/// Type alias for a progress callback function.
///
/// Callbacks must be thread-safe (`Send + Sync`) so a configured pipeline
/// can be moved to a worker thread.
pub type ProgressCallback = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    const STAGES: [TrainingStage; 6] = [
        TrainingStage::Initializing,
        TrainingStage::Splitting,
        TrainingStage::Preprocessing,
        TrainingStage::Training,
        TrainingStage::Evaluation,
        TrainingStage::Complete,
    ];

    #[test]
    fn test_training_stage_display() {
        for stage in STAGES {
            assert_eq!(stage.to_string(), stage.as_str());
        }
    }

    #[test]
    fn test_stages_are_ordered() {
        assert!(STAGES.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_progress_update_default() {
        let update = ProgressUpdate::default();
        assert_eq!(update.stage, TrainingStage::Initializing);
        assert_eq!(update.progress, 0.0);
        assert!(update.message.is_empty());
    }
}
