//! Keyword heuristic classifier.
//!
//! Counts occurrences of fixed positive and negative marker words and
//! compares the totals. Matching is substring-based, not whole-word:
//! `عالیه` counts for both `عالی` and `عالیه`, and `بی` matches inside
//! any word that contains it.

use super::{SentimentClassifier, ServiceDescriptor};
use crate::error::Result;
use crate::sentiment::{AnalysisRequest, AnalysisResult, Sentiment};

const POSITIVE_MARKERS: &[&str] = &[
    "عالی", "خوب", "عالیه", "دوست", "جذاب", "هیجان", "زیبا", "محشره", "مثبت",
];

const NEGATIVE_MARKERS: &[&str] = &["بد", "ضعیف", "بی", "مشکل", "خراب", "زشت", "ناراحت", "منفی"];

const DECISIVE_CONFIDENCE: f64 = 0.85;
const NEUTRAL_CONFIDENCE: f64 = 0.70;

/// Marker totals for a single text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    pub positive: usize,
    pub negative: usize,
}

/// Count marker occurrences in `text`.
///
/// The text is lower-cased first. Persian script has no case, so this
/// only affects embedded Latin text.
pub fn count_markers(text: &str) -> MarkerCounts {
    let lowered = text.to_lowercase();
    MarkerCounts {
        positive: POSITIVE_MARKERS
            .iter()
            .map(|marker| count_occurrences(&lowered, marker))
            .sum(),
        negative: NEGATIVE_MARKERS
            .iter()
            .map(|marker| count_occurrences(&lowered, marker))
            .sum(),
    }
}

/// Number of positions at which `needle` starts, overlaps included.
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack
        .char_indices()
        .filter(|&(start, _)| haystack[start..].starts_with(needle))
        .count()
}

/// Classify `text` by comparing marker counts.
pub fn classify_text(text: &str) -> AnalysisResult {
    let counts = count_markers(text);
    match counts.positive.cmp(&counts.negative) {
        std::cmp::Ordering::Greater => AnalysisResult::new(Sentiment::Positive, DECISIVE_CONFIDENCE),
        std::cmp::Ordering::Less => AnalysisResult::new(Sentiment::Negative, DECISIVE_CONFIDENCE),
        std::cmp::Ordering::Equal => AnalysisResult::new(Sentiment::Neutral, NEUTRAL_CONFIDENCE),
    }
}

/// Stateless classifier over the static word lists.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    descriptor: ServiceDescriptor,
}

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self {
            descriptor: ServiceDescriptor {
                service: "simple-sentiment",
                model: None,
            },
        }
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentClassifier for HeuristicClassifier {
    fn classify(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        Ok(classify_text(request.text()))
    }

    fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }
}
