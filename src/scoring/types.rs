use serde::Serialize;

use crate::constants::{TIER_HIGH, TIER_MODERATE, TIER_VERY_HIGH};

/// Confidence tier of a fused score (lower bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "very high")]
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= TIER_VERY_HIGH {
            ConfidenceLevel::VeryHigh
        } else if score >= TIER_HIGH {
            ConfidenceLevel::High
        } else if score >= TIER_MODERATE {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "very high",
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Moderate => "moderate",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How well the review image matches the product, as prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDescription {
    VeryWellMatched,
    MostlyMatched,
    WeakMatch,
    Unmatched,
}

impl MatchDescription {
    pub fn from_score(score: f64) -> Self {
        match ConfidenceLevel::from_score(score) {
            ConfidenceLevel::VeryHigh => MatchDescription::VeryWellMatched,
            ConfidenceLevel::High => MatchDescription::MostlyMatched,
            ConfidenceLevel::Moderate => MatchDescription::WeakMatch,
            ConfidenceLevel::Low => MatchDescription::Unmatched,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            MatchDescription::VeryWellMatched => "The review image matches the product very well.",
            MatchDescription::MostlyMatched => "The review image mostly matches the product.",
            MatchDescription::WeakMatch => "The review image only weakly matches the product.",
            MatchDescription::Unmatched => {
                "The review image does not match the product or could not be verified."
            }
        }
    }
}

impl std::fmt::Display for MatchDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
