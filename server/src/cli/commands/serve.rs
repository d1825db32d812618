use std::sync::Arc;

use log::info;
use sentiment::classify::HeuristicClassifier;

use crate::http::{self, ServerConfig};

/// Serve the heuristic classifier.
pub async fn heuristic(config: &ServerConfig) -> Result<(), String> {
    info!("Starting simple sentiment service on port {}", config.port);
    http::serve(config, Arc::new(HeuristicClassifier::new()))
        .await
        .map_err(|e| format!("Server error: {e}"))
}

/// Load the model, then serve it. A load failure aborts startup.
#[cfg(feature = "bert")]
pub async fn model(config: &ServerConfig, model_id: String, cpu: bool) -> Result<(), String> {
    use sentiment::classify::bert::BertSentimentModel;
    use sentiment::classify::{ModelClassifier, TextClassificationModel};

    info!("Loading sentiment model {model_id}");
    let model = tokio::task::spawn_blocking(move || BertSentimentModel::load(&model_id, cpu))
        .await
        .map_err(|e| format!("Model load task failed: {e}"))?
        .map_err(|e| e.to_string())?;
    info!("Model {} ready on {:?}", model.model_id(), model.device());

    http::serve(config, Arc::new(ModelClassifier::new(model)))
        .await
        .map_err(|e| format!("Server error: {e}"))
}

