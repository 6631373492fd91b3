use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::error::AnalyzerError;
use crate::config::Config;
use crate::embedding::{ImageEmbedder, device_label};
use crate::imaging::{BorderKeyMatting, ImageNormalizer};
use crate::sentiment::SentimentClassifier;

/// Analyses this build can run.
pub const FEATURES: [&str; 5] = [
    "embedding_similarity",
    "phash_similarity",
    "ssim_similarity",
    "sentiment_analysis",
    "background_removal",
];

/// Loaded once per process and shared read-only by every request.
#[derive(Debug)]
pub struct ModelContext {
    embedder: ImageEmbedder,
    classifier: SentimentClassifier,
    normalizer: ImageNormalizer,
}

/// Snapshot of which backends a [`ModelContext`] is running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub embedding_backend: &'static str,
    pub sentiment_backend: &'static str,
    pub sentiment_labels: Vec<String>,
    pub background_removal: bool,
    pub device: &'static str,
    pub models_loaded: bool,
    pub features: Vec<&'static str>,
}

impl ModelContext {
    pub fn load(config: &Config) -> Result<Self, AnalyzerError> {
        config.validate()?;

        let embedder = ImageEmbedder::load(config.embedder_config())?;
        let classifier = SentimentClassifier::load(config.sentiment_config())?;

        let normalizer = if config.remove_background {
            ImageNormalizer::new(Arc::new(BorderKeyMatting::new(config.matting_config())?))
        } else {
            ImageNormalizer::disabled()
        };

        info!(
            embedder_stub = embedder.is_stub(),
            classifier_stub = classifier.is_stub(),
            background_removal = normalizer.is_enabled(),
            "Model context ready"
        );

        Ok(Self {
            embedder,
            classifier,
            normalizer,
        })
    }

    /// Stub embedder, stub classifier, default matting.
    pub fn stub() -> Result<Self, AnalyzerError> {
        Self::load(&Config::default())
    }

    pub fn with_normalizer(mut self, normalizer: ImageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn embedder(&self) -> &ImageEmbedder {
        &self.embedder
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn normalizer(&self) -> &ImageNormalizer {
        &self.normalizer
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            embedding_backend: if self.embedder.has_model() {
                "clip-vit-base-patch32"
            } else {
                "stub"
            },
            sentiment_backend: if self.classifier.has_model() {
                "bert-sequence-classifier"
            } else {
                "lexicon-stub"
            },
            sentiment_labels: self.classifier.labels(),
            background_removal: self.normalizer.is_enabled(),
            device: device_label(self.embedder.device()),
            models_loaded: self.embedder.has_model() && self.classifier.has_model(),
            features: FEATURES.to_vec(),
        }
    }
}
