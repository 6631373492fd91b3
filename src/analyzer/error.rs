use thiserror::Error;

use crate::config::ConfigError;
use crate::embedding::EmbeddingError;
use crate::imaging::ImagingError;
use crate::sentiment::SentimentError;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("image embedder unavailable: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("sentiment classifier unavailable: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("image normalizer unavailable: {0}")]
    Imaging(#[from] ImagingError),

    /// Every similarity estimator failed for the same request.
    #[error("image comparison failed: {reason}")]
    PipelineFailed { reason: String },
}
