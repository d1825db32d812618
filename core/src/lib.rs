//! Persian sentiment classification.
//!
//! Two interchangeable classifiers sit behind [`classify::SentimentClassifier`]:
//! a keyword heuristic over static word lists, and a model-backed classifier
//! that forwards text to a pretrained sequence-classification model.

pub mod classify;
pub mod error;
pub mod sentiment;

pub use classify::SentimentClassifier;
pub use error::{Result, SentimentError};
pub use sentiment::{AnalysisRequest, AnalysisResult, PredictOptions, RawPrediction, Sentiment};
