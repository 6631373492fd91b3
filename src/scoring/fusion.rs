use serde::Serialize;

use super::types::{ConfidenceLevel, MatchDescription};
use crate::constants::{EMBEDDING_WEIGHT, MATCH_THRESHOLD, PHASH_WEIGHT, SSIM_WEIGHT};
use crate::similarity::SimilarityScore;

/// The three per-estimator scores of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SimilarityBreakdown {
    pub embedding: SimilarityScore,
    pub phash: SimilarityScore,
    pub ssim: SimilarityScore,
}

impl SimilarityBreakdown {
    pub fn new(embedding: SimilarityScore, phash: SimilarityScore, ssim: SimilarityScore) -> Self {
        Self {
            embedding,
            phash,
            ssim,
        }
    }

    pub fn fuse(&self) -> FusedSimilarity {
        FusedSimilarity::fuse(self.embedding, self.phash, self.ssim)
    }
}

/// Fixed-weight combination of the three signals.
///
/// The same value doubles as the confidence score; there is no separate uncertainty
/// estimate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct FusedSimilarity(f64);

impl FusedSimilarity {
    pub const ZERO: FusedSimilarity = FusedSimilarity(0.0);

    pub fn fuse(embedding: SimilarityScore, phash: SimilarityScore, ssim: SimilarityScore) -> Self {
        let fused = EMBEDDING_WEIGHT * embedding.value()
            + PHASH_WEIGHT * phash.value()
            + SSIM_WEIGHT * ssim.value();
        // Weights sum to one; the clamp only absorbs float rounding.
        Self(fused.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn confidence_score(self) -> f64 {
        self.0
    }

    pub fn is_matched(self) -> bool {
        self.0 > MATCH_THRESHOLD
    }

    pub fn confidence_level(self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.0)
    }

    pub fn match_description(self) -> MatchDescription {
        MatchDescription::from_score(self.0)
    }
}

impl From<FusedSimilarity> for f64 {
    fn from(fused: FusedSimilarity) -> Self {
        fused.0
    }
}
