use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use log::info;
use sentiment::AnalysisResult;

use crate::http::error::ApiError;
use crate::http::extractors::AnalyzeBody;
use crate::http::state::SharedState;

/// POST /analyze — classify the `text` field of the body.
pub async fn analyze(
    State(state): State<SharedState>,
    AnalyzeBody(request): AnalyzeBody,
) -> Result<Json<AnalysisResult>, ApiError> {
    request.validate()?;

    let preview: String = request.text().chars().take(50).collect();
    let length = request.text().chars().count();

    let classifier = Arc::clone(&state.classifier);
    let result = tokio::task::spawn_blocking(move || classifier.classify(&request)).await??;

    info!(
        "Analyzed {length} chars '{preview}' -> {} ({})",
        result.label, result.confidence
    );
    Ok(Json(result))
}
