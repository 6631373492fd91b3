use tracing::debug;

use super::SimilarityEstimator;
use super::error::SimilarityError;
use super::types::{EstimatorKind, SimilarityScore};
use crate::embedding::ImageEmbedder;
use crate::imaging::NormalizedImage;

/// Cosine similarity of two embeddings, in `[-1, 1]`.
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> Result<f64, SimilarityError> {
    if left.len() != right.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let (dot, left_sq, right_sq) = left.iter().zip(right).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, l, r), (&a, &b)| {
            let (a, b) = (f64::from(a), f64::from(b));
            (dot + a * b, l + a * a, r + b * b)
        },
    );

    let denom = left_sq.sqrt() * right_sq.sqrt();
    if denom == 0.0 {
        return Err(SimilarityError::Degenerate {
            reason: "zero-length embedding".to_string(),
        });
    }

    Ok(dot / denom)
}

/// Maps cosine `[-1, 1]` onto `[0, 1]` via `(cos + 1) / 2`.
pub fn rescale_cosine(cosine: f64) -> SimilarityScore {
    SimilarityScore::new((cosine + 1.0) / 2.0)
}

/// Semantic similarity via the shared image embedder.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddingEstimator<'m> {
    embedder: &'m ImageEmbedder,
}

impl<'m> EmbeddingEstimator<'m> {
    pub fn new(embedder: &'m ImageEmbedder) -> Self {
        Self { embedder }
    }
}

impl SimilarityEstimator for EmbeddingEstimator<'_> {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Embedding
    }

    fn estimate(
        &self,
        left: &NormalizedImage<'_>,
        right: &NormalizedImage<'_>,
    ) -> Result<SimilarityScore, SimilarityError> {
        let left_pixels = left.pixels()?;
        let right_pixels = right.pixels()?;
        let left_embedding = self.embedder.embed(&left_pixels)?;
        let right_embedding = self.embedder.embed(&right_pixels)?;

        let cosine = cosine_similarity(&left_embedding, &right_embedding)?;
        let score = rescale_cosine(cosine);

        debug!(cosine, score = score.value(), "Embedding similarity");

        Ok(score)
    }
}
