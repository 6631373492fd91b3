use serde::Serialize;

use crate::assessment::FAILURE_NARRATIVE;
use crate::scoring::{ConfidenceLevel, FusedSimilarity, SimilarityBreakdown};
use crate::sentiment::SentimentResult;

pub const FAILED_DESCRIPTION: &str = "analysis failed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSimilarity {
    pub score: f64,
    pub is_matched: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confidence {
    pub score: f64,
    pub level: ConfidenceLevel,
}

/// One analysis outcome. Always well-formed, including on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub embedding_similarity: f64,
    pub phash_similarity: f64,
    pub ssim_similarity: f64,
    pub final_similarity: f64,
    pub image_similarity: ImageSimilarity,
    pub confidence: Confidence,
    pub sentiment: Option<SentimentResult>,
    pub overall_assessment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultRecord {
    pub fn new(
        breakdown: SimilarityBreakdown,
        fused: FusedSimilarity,
        sentiment: Option<SentimentResult>,
        overall_assessment: String,
    ) -> Self {
        Self {
            embedding_similarity: breakdown.embedding.value(),
            phash_similarity: breakdown.phash.value(),
            ssim_similarity: breakdown.ssim.value(),
            final_similarity: fused.value(),
            image_similarity: ImageSimilarity {
                score: fused.value(),
                is_matched: fused.is_matched(),
                description: fused.match_description().text().to_string(),
            },
            confidence: Confidence {
                score: fused.confidence_score(),
                level: fused.confidence_level(),
            },
            sentiment,
            overall_assessment,
            error: None,
        }
    }

    /// Zeroed record carrying `error`.
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            embedding_similarity: 0.0,
            phash_similarity: 0.0,
            ssim_similarity: 0.0,
            final_similarity: 0.0,
            image_similarity: ImageSimilarity {
                score: 0.0,
                is_matched: false,
                description: FAILED_DESCRIPTION.to_string(),
            },
            confidence: Confidence {
                score: 0.0,
                level: ConfidenceLevel::Low,
            },
            sentiment: None,
            overall_assessment: FAILURE_NARRATIVE.to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
