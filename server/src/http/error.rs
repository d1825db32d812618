//! API error type with automatic JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use sentiment::SentimentError;

/// Returned for any failure that is not the client's fault. Internal
/// detail is logged, never sent.
pub const INTERNAL_ERROR_MESSAGE: &str = "خطای پردازش داخلی";

/// Returned when the body is not a JSON object of the expected shape.
pub const INVALID_BODY_MESSAGE: &str = "بدنه درخواست نامعتبر است";

pub const MODEL_NOT_READY_MESSAGE: &str = "Model not ready";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ServiceUnavailable(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_owned(),
            ),
        };
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<SentimentError> for ApiError {
    fn from(err: SentimentError) -> Self {
        match err {
            SentimentError::Validation { message } => ApiError::BadRequest(message),
            SentimentError::ModelNotReady { .. } => {
                ApiError::ServiceUnavailable(MODEL_NOT_READY_MESSAGE.to_owned())
            }
            SentimentError::Processing { .. } | SentimentError::ModelLoad { .. } => {
                error!("Analysis failed: {err}");
                ApiError::Internal
            }
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!("Classifier task failed: {err}");
        ApiError::Internal
    }
}
