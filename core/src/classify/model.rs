//! Model-backed classifier.
//!
//! Wraps a pretrained text-classification model behind
//! [`TextClassificationModel`] and translates its raw label into the
//! sentiment taxonomy.

use log::error;

use super::{ModelInfo, SentimentClassifier, ServiceDescriptor};
use crate::error::{Result, SentimentError};
use crate::sentiment::{AnalysisRequest, AnalysisResult, PredictOptions, RawPrediction};

pub const DEFAULT_MODEL_ID: &str = "HooshvareLab/bert-fa-base-uncased-sentiment";

/// Sentence run by the health probe.
pub const SMOKE_TEST_TEXT: &str = "این یک تست است";

/// Shortest `max_length` that still fits `[CLS]` and `[SEP]`.
pub const MIN_MAX_LENGTH: usize = 2;

/// A pretrained classifier returning its single best label for a text.
pub trait TextClassificationModel: Send + Sync {
    fn predict(&self, text: &str, options: &PredictOptions) -> Result<RawPrediction>;

    /// Identifier the model was loaded from.
    fn model_id(&self) -> &str;
}

/// Sentiment classifier backed by a loaded model.
///
/// Built once at startup; the model is never mutated afterwards.
pub struct ModelClassifier<M> {
    model: M,
    descriptor: ServiceDescriptor,
}

impl<M: TextClassificationModel> ModelClassifier<M> {
    pub fn new(model: M) -> Self {
        let descriptor = ServiceDescriptor {
            service: "sentiment-analysis",
            model: Some(ModelInfo {
                model_name: model.model_id().to_owned(),
                task: "sentiment-analysis".to_owned(),
                language: "fa".to_owned(),
                labels: vec![
                    "negative".to_owned(),
                    "neutral".to_owned(),
                    "positive".to_owned(),
                ],
                max_length: crate::sentiment::DEFAULT_MAX_LENGTH,
                description: "BERT base uncased model for Persian sentiment analysis".to_owned(),
            }),
        };
        Self { model, descriptor }
    }

    #[cfg(test)]
    fn model(&self) -> &M {
        &self.model
    }
}

impl<M: TextClassificationModel> SentimentClassifier for ModelClassifier<M> {
    fn classify(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let options = request.options();
        if options.truncation && options.max_length < MIN_MAX_LENGTH {
            return Err(SentimentError::validation(format!(
                "max_length باید حداقل {MIN_MAX_LENGTH} باشد"
            )));
        }

        let prediction = self.model.predict(request.text(), &options)?;
        Ok(AnalysisResult::from_prediction(prediction))
    }

    fn probe(&self) -> Result<()> {
        self.model
            .predict(SMOKE_TEST_TEXT, &PredictOptions::default())
            .map(|_| ())
            .map_err(|e| {
                error!("Health check failed: {e}");
                SentimentError::model_not_ready("Model not ready")
            })
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;
    use std::sync::Mutex;

    /// Returns a fixed prediction and records the options it was called with.
    struct FixedModel {
        label: &'static str,
        score: f32,
        fail: bool,
        seen: Mutex<Vec<(String, PredictOptions)>>,
    }

    impl FixedModel {
        fn new(label: &'static str, score: f32) -> Self {
            Self {
                label,
                score,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new("LABEL_1", 0.0)
            }
        }
    }

    impl TextClassificationModel for FixedModel {
        fn predict(&self, text: &str, options: &PredictOptions) -> Result<RawPrediction> {
            self.seen.lock().unwrap().push((text.to_owned(), *options));
            if self.fail {
                return Err(SentimentError::processing("CUDA out of memory"));
            }
            Ok(RawPrediction {
                label: self.label.to_owned(),
                score: self.score,
            })
        }

        fn model_id(&self) -> &str {
            "test/fixed"
        }
    }

    #[test]
    fn test_classify_maps_label_and_rounds() {
        let classifier = ModelClassifier::new(FixedModel::new("LABEL_0", 0.912_345));
        let result = classifier.classify(&AnalysisRequest::new("بد بود")).unwrap();
        assert_eq!(result.label, Sentiment::Negative);
        assert_eq!(result.sentiment, "منفی");
        assert_eq!(result.label_id, Some(0));
        assert!((result.confidence - 0.9123).abs() < f64::EPSILON);
        let raw = result.raw_output.unwrap();
        assert_eq!(raw.label, "LABEL_0");
    }

    #[test]
    fn test_unrecognized_label_is_unknown() {
        let classifier = ModelClassifier::new(FixedModel::new("mixed", 0.4));
        let result = classifier.classify(&AnalysisRequest::new("متن")).unwrap();
        assert_eq!(result.label, Sentiment::Unknown);
        assert_eq!(result.label_id, Some(-1));
    }

    #[test]
    fn test_forwards_request_options() {
        let classifier = ModelClassifier::new(FixedModel::new("LABEL_2", 0.9));
        let mut request = AnalysisRequest::new("عالی");
        request.truncation = false;
        request.max_length = 128;
        classifier.classify(&request).unwrap();

        let seen = classifier.model().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "عالی");
        assert_eq!(
            seen[0].1,
            PredictOptions {
                truncation: false,
                max_length: 128
            }
        );
    }

    #[test]
    fn test_rejects_unusable_max_length() {
        let classifier = ModelClassifier::new(FixedModel::new("LABEL_2", 0.9));
        let mut request = AnalysisRequest::new("عالی");
        request.max_length = 1;
        let err = classifier.classify(&request).unwrap_err();
        assert!(matches!(err, SentimentError::Validation { .. }));
        assert!(classifier.model().seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_model_failure_is_processing_error() {
        let classifier = ModelClassifier::new(FixedModel::failing());
        let err = classifier.classify(&AnalysisRequest::new("متن")).unwrap_err();
        assert!(matches!(err, SentimentError::Processing { .. }));
    }

    #[test]
    fn test_probe_runs_smoke_sentence() {
        let classifier = ModelClassifier::new(FixedModel::new("LABEL_1", 0.6));
        classifier.probe().unwrap();
        let seen = classifier.model().seen.lock().unwrap();
        assert_eq!(seen[0].0, SMOKE_TEST_TEXT);
        assert_eq!(seen[0].1, PredictOptions::default());
    }

    #[test]
    fn test_probe_failure_is_model_not_ready() {
        let classifier = ModelClassifier::new(FixedModel::failing());
        let err = classifier.probe().unwrap_err();
        assert!(matches!(err, SentimentError::ModelNotReady { .. }));
    }

    #[test]
    fn test_descriptor_reports_model() {
        let classifier = ModelClassifier::new(FixedModel::new("LABEL_1", 0.6));
        let descriptor = classifier.descriptor();
        assert_eq!(descriptor.service, "sentiment-analysis");
        let info = descriptor.model.as_ref().unwrap();
        assert_eq!(info.model_name, "test/fixed");
        assert_eq!(info.labels, ["negative", "neutral", "positive"]);
        assert_eq!(info.max_length, 512);
    }
}
