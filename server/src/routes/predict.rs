//! `POST /predict`: score one client record.

use axum::Json;
use axum::extract::State;
use bank_learning::PredictionResult;
use bank_processing::ClientRecord;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Validate the body, run it through the model and return
/// `{"prediction", "probability"}`.
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PredictionResult>, ApiError> {
    let record = ClientRecord::from_json(&body)?;
    debug!("Scoring record: {:?}", record);

    let result = state.model.predict_record(&record)?;
    debug!(
        "Predicted '{}' with probability {:.4}",
        result.prediction, result.probability
    );
    Ok(Json(result))
}
