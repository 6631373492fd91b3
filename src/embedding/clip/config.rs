use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Weights file expected inside a model directory.
pub const CLIP_WEIGHTS_FILE: &str = "model.safetensors";

#[derive(Debug, Clone, Default)]
/// Configuration for [`ImageEmbedder`](super::ImageEmbedder).
pub struct EmbedderConfig {
    /// CLIP ViT-B/32 checkpoint: a directory holding `model.safetensors`, or the file itself.
    pub model_path: PathBuf,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl EmbedderConfig {
    /// Env var used to locate the CLIP checkpoint.
    pub const ENV_MODEL_PATH: &'static str = "VERITY_CLIP_MODEL_PATH";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            testing_stub: false,
        }
    }

    /// Creates a stub config (no model files; deterministic thumbnail embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Reads the model path from the environment; unset means stub mode.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self::new)
            .unwrap_or_else(Self::stub)
    }

    /// Resolves the safetensors file from `model_path`.
    pub fn weights_path(&self) -> PathBuf {
        if self.model_path.is_dir() {
            self.model_path.join(CLIP_WEIGHTS_FILE)
        } else {
            self.model_path.clone()
        }
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path is required (stubbing is disabled)".to_string(),
            });
        }

        let weights = self.weights_path();
        if !weights.is_file() {
            return Err(EmbeddingError::ModelNotFound { path: weights });
        }

        Ok(())
    }

    pub fn model_available(&self) -> bool {
        !self.model_path.as_os_str().is_empty() && self.weights_path().is_file()
    }
}
