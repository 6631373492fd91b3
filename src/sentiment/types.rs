use serde::Serialize;

use crate::constants::SENTIMENT_FAILURE_SCORE;

/// Raw output of a text classifier: its top label token and that label's probability.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    pub label: String,
    pub probability: f64,
}

impl RawPrediction {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }

    /// `true` when the label token names a positive class (`pos...` or `긍정`).
    pub fn indicates_positive(&self) -> bool {
        let label = self.label.to_lowercase();
        label.contains("pos") || label.contains("긍정")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Unknown,
}

impl SentimentLabel {
    pub fn description(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive review",
            SentimentLabel::Negative => "negative review",
            SentimentLabel::Unknown => "analysis failed",
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, SentimentLabel::Unknown)
    }
}

/// Normalized sentiment. `score` is the confidence in `label` as returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
    pub description: String,
}

impl SentimentResult {
    /// Positive labels keep `p`; any other label becomes negative with `1 - p`.
    pub fn from_raw(raw: &RawPrediction) -> Self {
        let p = if raw.probability.is_nan() {
            SENTIMENT_FAILURE_SCORE
        } else {
            raw.probability.clamp(0.0, 1.0)
        };

        let (label, score) = if raw.indicates_positive() {
            (SentimentLabel::Positive, p)
        } else {
            (SentimentLabel::Negative, 1.0 - p)
        };

        Self::with_label(label, score)
    }

    pub fn failed() -> Self {
        Self::with_label(SentimentLabel::Unknown, SENTIMENT_FAILURE_SCORE)
    }

    fn with_label(label: SentimentLabel, score: f64) -> Self {
        Self {
            label,
            score,
            description: label.description().to_string(),
        }
    }
}
