pub mod lexicon;
pub mod model;

#[cfg(feature = "bert")]
pub mod bert;

use serde::Serialize;

use crate::error::Result;
use crate::sentiment::{AnalysisRequest, AnalysisResult};

pub use lexicon::HeuristicClassifier;
pub use model::{ModelClassifier, TextClassificationModel};

/// A sentiment classifier the HTTP layer can serve.
///
/// Implementations are immutable once built and shared across requests.
pub trait SentimentClassifier: Send + Sync {
    /// Classify a request that has already passed
    /// [`AnalysisRequest::validate`].
    fn classify(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;

    /// Health probe. Fails with `ModelNotReady` when the classifier
    /// cannot serve requests.
    fn probe(&self) -> Result<()>;

    /// Static description of the deployment.
    fn descriptor(&self) -> &ServiceDescriptor;
}

/// What a deployment reports about itself on `/health`, `/` and `/info`.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Service name reported by `/health`.
    pub service: &'static str,
    /// Present only for model-backed deployments.
    pub model: Option<ModelInfo>,
}

/// Metadata served by `GET /info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub task: String,
    pub language: String,
    pub labels: Vec<String>,
    pub max_length: usize,
    pub description: String,
}
