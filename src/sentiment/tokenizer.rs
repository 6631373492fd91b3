use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

use super::error::SentimentError;

/// Loads `tokenizer.json` from a model directory (or the file itself) with truncation
/// at `max_len` tokens.
pub fn load_tokenizer(model_path: &Path, max_len: usize) -> Result<Tokenizer, SentimentError> {
    let tokenizer_path = if model_path.is_dir() {
        model_path.join("tokenizer.json")
    } else {
        model_path.to_path_buf()
    };

    if !tokenizer_path.is_file() {
        return Err(SentimentError::ModelNotFound {
            path: tokenizer_path,
        });
    }

    let mut tokenizer =
        Tokenizer::from_file(&tokenizer_path).map_err(|e| SentimentError::ModelLoadFailed {
            reason: format!("Failed to load tokenizer: {}", e),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| SentimentError::ModelLoadFailed {
            reason: format!("Failed to configure truncation: {}", e),
        })?;

    Ok(tokenizer)
}
