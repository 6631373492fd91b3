use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::imaging::ImagingError;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("image unavailable: {0}")]
    Image(#[from] ImagingError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("degenerate input: {reason}")]
    Degenerate { reason: String },

    #[error("structural comparison failed: {reason}")]
    ComparisonFailed { reason: String },
}
