//! Shared application state.
//!
//! The model is loaded once at startup and never mutated afterwards, so the
//! state is a plain `Arc` with no lock around it.

use bank_learning::TrainedModel;
use std::sync::Arc;

/// State handed to every request handler through axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub model: Arc<TrainedModel>,
}

impl AppState {
    pub fn new(model: TrainedModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}
