use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use sentiment::classify::ModelInfo;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::state::SharedState;

#[derive(Serialize)]
pub(in crate::http) struct RootResponse {
    service: &'static str,
    language: &'static str,
    status: &'static str,
    model: String,
    endpoints: BTreeMap<&'static str, &'static str>,
}

/// GET / — service descriptor and endpoint list.
pub async fn root(State(state): State<SharedState>) -> Result<Json<RootResponse>, ApiError> {
    let info = model_info(&state)?;
    let endpoints = BTreeMap::from([
        ("analyze", "POST /analyze"),
        ("health", "GET /health"),
        ("info", "GET /info"),
    ]);
    Ok(Json(RootResponse {
        service: "Sentiment Analysis API",
        language: "Persian (Farsi)",
        status: "active",
        model: info.model_name.clone(),
        endpoints,
    }))
}

/// GET /info — static model metadata.
pub async fn info(State(state): State<SharedState>) -> Result<Json<ModelInfo>, ApiError> {
    model_info(&state).cloned().map(Json)
}

/// Only routed for model deployments, so a missing model is a wiring bug.
fn model_info(state: &SharedState) -> Result<&ModelInfo, ApiError> {
    state.classifier.descriptor().model.as_ref().ok_or_else(|| {
        log::error!("Model metadata requested from a deployment without a model");
        ApiError::Internal
    })
}
