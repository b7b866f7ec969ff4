//! HTTP error mapping.
//!
//! Validation failures become `400 {"error": <message>}`. Anything else is
//! logged and reported as a generic `500`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bank_learning::LearningError;
use bank_processing::RecordError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed validation.
    #[error(transparent)]
    Validation(#[from] RecordError),

    /// The model failed on a validated record.
    #[error("inference failed: {0}")]
    Inference(#[from] LearningError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Validation(e) => {
                debug!(field = ?e.field(), "Rejected request: {}", e);
                e.to_string()
            }
            ApiError::Inference(e) => {
                error!(code = e.error_code(), "Prediction failed: {}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };
        (self.status_code(), Json(ErrorResponse { error: message })).into_response()
    }
}
