use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("sentiment model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load sentiment model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("sentiment inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("invalid sentiment configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("review text is empty")]
    EmptyInput,
}

impl From<candle_core::Error> for SentimentError {
    fn from(err: candle_core::Error) -> Self {
        SentimentError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for SentimentError {
    fn from(err: std::io::Error) -> Self {
        SentimentError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
