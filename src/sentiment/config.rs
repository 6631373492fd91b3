use std::path::PathBuf;

use crate::constants::SENTIMENT_MAX_SEQ_LEN;

use super::error::SentimentError;

/// Files a sentiment model directory must contain.
pub const SENTIMENT_MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// BERT sequence-classification checkpoint directory. `None` selects the lexicon stub.
    pub model_path: Option<PathBuf>,

    pub max_seq_len: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: SENTIMENT_MAX_SEQ_LEN,
        }
    }
}

impl SentimentConfig {
    pub const ENV_MODEL_PATH: &'static str = "VERITY_SENTIMENT_MODEL_PATH";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.model_path.is_none()
    }

    pub fn validate(&self) -> Result<(), SentimentError> {
        if self.max_seq_len == 0 {
            return Err(SentimentError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err(SentimentError::InvalidConfig {
                reason: "model_path cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }

    /// First required model file missing from `model_path`, if any.
    pub fn missing_file(&self) -> Option<PathBuf> {
        let dir = self.model_path.as_ref()?;
        SENTIMENT_MODEL_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| !path.is_file())
    }

    pub fn from_env() -> Self {
        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            model_path,
            ..Default::default()
        }
    }
}
