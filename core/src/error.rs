use serde::Serialize;
use thiserror::Error;

/// Unified error type for sentiment classification.
///
/// Serializes to a tagged JSON object so callers can tell the failure
/// kinds apart without matching on message text.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum SentimentError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Model not ready: {message}")]
    ModelNotReady { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Model load error: {message}")]
    ModelLoad { message: String },
}

pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a Model Not Ready error
    pub fn model_not_ready(message: impl Into<String>) -> Self {
        Self::ModelNotReady {
            message: message.into(),
        }
    }

    /// Create a Processing error
    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }

    /// Create a Model Load error
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }
}

#[cfg(feature = "bert")]
impl From<candle_core::Error> for SentimentError {
    fn from(err: candle_core::Error) -> Self {
        SentimentError::processing(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = SentimentError::validation("متن ارسال نشده");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"type\":\"Validation\""));
        assert!(json.contains("\"message\":\"متن ارسال نشده\""));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = SentimentError::processing("boom");
        assert_eq!(err.to_string(), "Processing error: boom");
    }
}
