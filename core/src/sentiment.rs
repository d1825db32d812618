//! Request and result types shared by every classifier.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

/// Returned when `text` is missing, `null`, or empty.
pub const MISSING_TEXT_MESSAGE: &str = "متن ارسال نشده";

pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Sentiment taxonomy. `Unknown` is the sentinel for labels a model
/// returns that fall outside the three-way taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
    Unknown,
}

impl Sentiment {
    /// English label, as used in the `label` field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
            Self::Unknown => "unknown",
        }
    }

    /// Persian display text, as used in the `sentiment` field.
    pub fn localized(self) -> &'static str {
        match self {
            Self::Negative => "منفی",
            Self::Neutral => "خنثی",
            Self::Positive => "مثبت",
            Self::Unknown => "نامشخص",
        }
    }

    /// Numeric id in the model taxonomy.
    pub fn id(self) -> i32 {
        match self {
            Self::Negative => 0,
            Self::Neutral => 1,
            Self::Positive => 2,
            Self::Unknown => -1,
        }
    }

    /// Map a raw model label (`LABEL_0`..`LABEL_2`) onto the taxonomy.
    pub fn from_model_label(label: &str) -> Self {
        match label {
            "LABEL_0" => Self::Negative,
            "LABEL_1" => Self::Neutral,
            "LABEL_2" => Self::Positive,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_truncation")]
    pub truncation: bool,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_truncation() -> bool {
    true
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            truncation: default_truncation(),
            max_length: default_max_length(),
        }
    }

    /// The request text, empty when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Reject requests without text. Whitespace-only text is accepted.
    pub fn validate(&self) -> Result<()> {
        if self.text().is_empty() {
            return Err(SentimentError::validation(MISSING_TEXT_MESSAGE));
        }
        Ok(())
    }

    pub fn options(&self) -> PredictOptions {
        PredictOptions {
            truncation: self.truncation,
            max_length: self.max_length,
        }
    }
}

/// Per-request options forwarded to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictOptions {
    pub truncation: bool,
    pub max_length: usize,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            truncation: true,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Single best label produced by a model, echoed back as `raw_output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub label: String,
    pub score: f32,
}

/// Classification outcome. `label_id` and `raw_output` are only set on
/// the model path and are omitted from JSON otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: String,
    pub confidence: f64,
    pub label: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<RawPrediction>,
}

impl AnalysisResult {
    pub fn new(label: Sentiment, confidence: f64) -> Self {
        Self {
            sentiment: label.localized().to_owned(),
            confidence,
            label,
            label_id: None,
            raw_output: None,
        }
    }

    /// Build a result from a model prediction, rounding the score to
    /// four decimal places.
    pub fn from_prediction(prediction: RawPrediction) -> Self {
        let label = Sentiment::from_model_label(&prediction.label);
        let confidence = round_confidence(prediction.score);
        Self {
            label_id: Some(label.id()),
            raw_output: Some(prediction),
            ..Self::new(label, confidence)
        }
    }
}

fn round_confidence(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_label_mapping() {
        assert_eq!(Sentiment::from_model_label("LABEL_0"), Sentiment::Negative);
        assert_eq!(Sentiment::from_model_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_model_label("LABEL_2"), Sentiment::Positive);
        assert_eq!(Sentiment::from_model_label("LABEL_3"), Sentiment::Unknown);
        assert_eq!(Sentiment::from_model_label("positive"), Sentiment::Unknown);
        assert_eq!(Sentiment::Unknown.id(), -1);
        assert_eq!(Sentiment::Unknown.localized(), "نامشخص");
    }

    #[test]
    fn test_request_defaults() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"text":"سلام"}"#).unwrap();
        assert_eq!(req.text(), "سلام");
        assert!(req.truncation);
        assert_eq!(req.max_length, 512);
        assert_eq!(req.options(), PredictOptions::default());
    }

    #[test]
    fn test_validate_rejects_missing_null_and_empty() {
        for body in [r"{}", r#"{"text":null}"#, r#"{"text":""}"#] {
            let req: AnalysisRequest = serde_json::from_str(body).unwrap();
            let err = req.validate().unwrap_err();
            assert!(matches!(err, SentimentError::Validation { .. }), "{body}");
        }
        assert!(AnalysisRequest::new("  ").validate().is_ok());
    }

    #[test]
    fn test_heuristic_result_omits_model_fields() {
        let result = AnalysisResult::new(Sentiment::Positive, 0.85);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sentiment": "مثبت", "confidence": 0.85, "label": "positive"})
        );
    }

    #[test]
    fn test_from_prediction_rounds_score() {
        let result = AnalysisResult::from_prediction(RawPrediction {
            label: "LABEL_2".to_owned(),
            score: 0.987_654,
        });
        assert_eq!(result.label, Sentiment::Positive);
        assert_eq!(result.sentiment, "مثبت");
        assert!((result.confidence - 0.9877).abs() < f64::EPSILON);
        assert_eq!(result.label_id, Some(2));
        assert_eq!(result.raw_output.unwrap().label, "LABEL_2");
    }

    #[test]
    fn test_from_prediction_unknown_label() {
        let result = AnalysisResult::from_prediction(RawPrediction {
            label: "no_idea".to_owned(),
            score: 0.5,
        });
        assert_eq!(result.label, Sentiment::Unknown);
        assert_eq!(result.label_id, Some(-1));
        assert_eq!(result.sentiment, "نامشخص");
    }
}
