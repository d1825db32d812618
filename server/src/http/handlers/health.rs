use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::state::SharedState;

#[derive(Serialize)]
pub(in crate::http) struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_loaded: Option<bool>,
    service: &'static str,
}

/// GET /health — runs the classifier's probe; 503 if it fails.
pub async fn health(State(state): State<SharedState>) -> Result<Json<HealthResponse>, ApiError> {
    let classifier = Arc::clone(&state.classifier);
    tokio::task::spawn_blocking(move || classifier.probe()).await??;

    let descriptor = state.classifier.descriptor();
    Ok(Json(HealthResponse {
        status: "healthy",
        model_loaded: descriptor.model.as_ref().map(|_| true),
        service: descriptor.service,
    }))
}
