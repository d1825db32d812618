//! Custom axum extractors for request bodies.

use axum::extract::{FromRequest, Request};
use axum::Json;
use log::debug;
use sentiment::AnalysisRequest;

use super::error::{ApiError, INVALID_BODY_MESSAGE};

/// JSON body of `POST /analyze`.
///
/// Malformed JSON, a wrong content type, or a body of the wrong shape is
/// rejected as a 400 with a localized message instead of axum's plain-text
/// rejection.
pub struct AnalyzeBody(pub AnalysisRequest);

impl<S: Send + Sync> FromRequest<S> for AnalyzeBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(request) = Json::<AnalysisRequest>::from_request(req, state)
            .await
            .map_err(|e| {
                debug!("Rejected analyze body: {e}");
                ApiError::BadRequest(INVALID_BODY_MESSAGE.to_owned())
            })?;
        Ok(AnalyzeBody(request))
    }
}
