//! Review-text sentiment.
//!
//! [`SentimentClassifier`] wraps a BERT sequence classifier (or a lexicon stub) that
//! yields a [`RawPrediction`]; [`SentimentResult::from_raw`] folds that into a
//! positive/negative label whose score is the confidence in the returned label.

pub mod bert;
pub mod config;
pub mod error;
mod lexicon;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;

pub use bert::BertSequenceClassifier;
pub use config::{SENTIMENT_MODEL_FILES, SentimentConfig};
pub use error::SentimentError;
pub use types::{RawPrediction, SentimentLabel, SentimentResult};

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::select_device;
use tokenizer::load_tokenizer;

enum ClassifierBackend {
    Model {
        model: BertSequenceClassifier,
        tokenizer: Box<Tokenizer>,
        device: Device,
    },
    Stub {
        device: Device,
    },
}

pub struct SentimentClassifier {
    backend: ClassifierBackend,
    config: SentimentConfig,
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("device", &format!("{:?}", self.device()))
            .field("config", &self.config)
            .field("model_loaded", &self.has_model())
            .finish()
    }
}

impl SentimentClassifier {
    pub fn load(config: SentimentConfig) -> Result<Self, SentimentError> {
        config.validate()?;

        let device = select_device();
        debug!(?device, "Selected compute device for sentiment classifier");

        let Some(model_path) = config.model_path.clone() else {
            info!("No sentiment model path configured, operating in stub mode");
            return Ok(Self {
                backend: ClassifierBackend::Stub { device },
                config,
            });
        };

        if let Some(missing) = config.missing_file() {
            return Err(SentimentError::ModelNotFound { path: missing });
        }

        info!(model_path = %model_path.display(), "Loading sentiment model");

        let model = BertSequenceClassifier::load(&model_path, &device).map_err(|e| {
            SentimentError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer(&model_path, config.max_seq_len)?;

        info!(
            labels = ?model.labels(),
            max_seq_len = config.max_seq_len,
            "Sentiment model loaded successfully"
        );

        Ok(Self {
            backend: ClassifierBackend::Model {
                model,
                tokenizer: Box::new(tokenizer),
                device,
            },
            config,
        })
    }

    pub fn stub() -> Result<Self, SentimentError> {
        Self::load(SentimentConfig::stub())
    }

    /// Top label and its probability, straight from the backend.
    pub fn classify_raw(&self, text: &str) -> Result<RawPrediction, SentimentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SentimentError::EmptyInput);
        }

        let raw = match &self.backend {
            ClassifierBackend::Model {
                model,
                tokenizer,
                device,
            } => Self::predict_with_model(text, model, tokenizer, device)?,
            ClassifierBackend::Stub { .. } => Self::predict_stub(text),
        };

        debug!(
            text_len = text.len(),
            label = %raw.label,
            probability = raw.probability,
            "Classified review text"
        );

        Ok(raw)
    }

    /// Fail-soft classification: any backend failure becomes [`SentimentResult::failed`].
    pub fn classify(&self, text: &str) -> SentimentResult {
        match self.classify_raw(text) {
            Ok(raw) => SentimentResult::from_raw(&raw),
            Err(e) => {
                warn!(error = %e, "Sentiment classification failed");
                SentimentResult::failed()
            }
        }
    }

    fn predict_with_model(
        text: &str,
        model: &BertSequenceClassifier,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<RawPrediction, SentimentError> {
        let tokens =
            tokenizer
                .encode(text, true)
                .map_err(|e| SentimentError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let token_ids = Tensor::new(tokens.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(tokens.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(tokens.get_attention_mask(), device)?.unsqueeze(0)?;

        let probabilities = model
            .probabilities(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| SentimentError::InferenceFailed {
                reason: e.to_string(),
            })?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        let (index, probability) =
            top_class(&probabilities).ok_or_else(|| SentimentError::InferenceFailed {
                reason: "classifier returned no classes".to_string(),
            })?;

        let label = model
            .label(index)
            .ok_or_else(|| SentimentError::InferenceFailed {
                reason: format!("class index {index} has no label"),
            })?;

        Ok(RawPrediction::new(label, f64::from(probability)))
    }

    /// Lexicon stand-in for a two-class head ordered `[NEGATIVE, POSITIVE]`.
    ///
    /// Text with no sentiment words, or a balanced margin, is a tie at 0.5 and
    /// resolves to `NEGATIVE` like [`top_class`] does for the model, so the mapped
    /// result is `negative` with score 0.5.
    fn predict_stub(text: &str) -> RawPrediction {
        let p = lexicon::positive_probability(text);
        if p > 0.5 {
            RawPrediction::new("POSITIVE", p)
        } else {
            RawPrediction::new("NEGATIVE", 1.0 - p)
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, ClassifierBackend::Stub { .. })
    }

    pub fn has_model(&self) -> bool {
        matches!(self.backend, ClassifierBackend::Model { .. })
    }

    pub fn labels(&self) -> Vec<String> {
        match &self.backend {
            ClassifierBackend::Model { model, .. } => model.labels().to_vec(),
            ClassifierBackend::Stub { .. } => vec!["NEGATIVE".to_string(), "POSITIVE".to_string()],
        }
    }

    pub fn device(&self) -> &Device {
        match &self.backend {
            ClassifierBackend::Model { device, .. } | ClassifierBackend::Stub { device } => device,
        }
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }
}

/// Highest-probability class; ties go to the lowest index.
fn top_class(probabilities: &[f32]) -> Option<(usize, f32)> {
    probabilities
        .iter()
        .copied()
        .enumerate()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}
