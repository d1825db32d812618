//! Shared application state for the HTTP server.

use std::sync::Arc;

use sentiment::SentimentClassifier;

/// Shared state accessible by all handlers via axum's State extractor.
///
/// The classifier is built before the listener is bound and never
/// replaced afterwards.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn SentimentClassifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }
}

pub type SharedState = Arc<AppState>;
