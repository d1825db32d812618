//! Router construction.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use super::handlers::{analyze, health, info};
use super::middleware::log_request;
use super::state::SharedState;

/// Build the router for the deployment described by the state's classifier.
///
/// `/` and `/info` only exist when the classifier is model-backed.
pub fn build_router(state: SharedState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/analyze", post(analyze::analyze));

    if state.classifier.descriptor().model.is_some() {
        router = router
            .route("/", get(info::root))
            .route("/info", get(info::info));
    }

    router
        .layer(axum::middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
