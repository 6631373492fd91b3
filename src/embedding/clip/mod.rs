//! CLIP image embedder (safetensors checkpoint).
//!
//! Use [`EmbedderConfig::stub`] for tests/examples without model files.

/// Embedder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{CLIP_WEIGHTS_FILE, EmbedderConfig};

use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::clip::{ClipConfig, ClipModel};
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::{debug, info, warn};

use crate::constants::{CLIP_MEAN, CLIP_STD, STUB_EMBEDDING_SIDE};
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;

enum EmbedderBackend {
    Model {
        model: Arc<ClipModel>,
        device: Device,
        image_size: usize,
    },
    Stub {
        device: Device,
    },
}

/// Unit-normalized image embeddings from a shared multimodal model (supports stub mode).
///
/// Immutable once loaded; share it by reference across requests.
pub struct ImageEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for ImageEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub { device } => format!("Stub({:?})", device),
                },
            )
            .field("model_path", &self.config.model_path)
            .finish()
    }
}

impl ImageEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device();
        debug!(?device, "Selected compute device for image embedder");

        if config.testing_stub {
            warn!("Image embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub { device },
                config,
            });
        }

        let clip_config = ClipConfig::vit_base_patch32();
        let weights = config.weights_path();

        // SAFETY: the safetensors file is mapped read-only and not modified while loaded.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[&weights], DType::F32, &device) }
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to map {}: {}", weights.display(), e),
            })?;

        let model = ClipModel::new(vb, &clip_config).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to build CLIP model: {}", e),
        })?;

        info!(
            model_path = %weights.display(),
            image_size = clip_config.image_size,
            "CLIP model loaded successfully"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model: Arc::new(model),
                device,
                image_size: clip_config.image_size,
            },
            config,
        })
    }

    /// Convenience constructor for [`EmbedderConfig::stub`].
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EmbedderConfig::stub())
    }

    /// Embeds one image into a unit-length vector.
    pub fn embed(&self, image: &DynamicImage) -> Result<Vec<f32>, EmbeddingError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(EmbeddingError::PreprocessFailed {
                reason: "image has no pixels".to_string(),
            });
        }

        match &self.backend {
            EmbedderBackend::Model {
                model,
                device,
                image_size,
            } => self.embed_with_model(image, model, device, *image_size),
            EmbedderBackend::Stub { .. } => Ok(self.embed_stub(image)),
        }
    }

    fn embed_with_model(
        &self,
        image: &DynamicImage,
        model: &ClipModel,
        device: &Device,
        image_size: usize,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let pixel_values = preprocess(image, image_size, device)?;

        let features = model
            .get_image_features(&pixel_values)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Vision tower forward pass failed: {}", e),
            })?;

        let embedding = features.squeeze(0)?.to_vec1::<f32>()?;

        debug!(dim = embedding.len(), "Generated image embedding");

        Ok(l2_normalize(embedding))
    }

    fn embed_stub(&self, image: &DynamicImage) -> Vec<f32> {
        let thumb = image
            .resize_exact(STUB_EMBEDDING_SIDE, STUB_EMBEDDING_SIDE, FilterType::Triangle)
            .to_rgb8();

        let raw: Vec<f32> = thumb.into_raw().into_iter().map(|v| v as f32 / 255.0).collect();
        let mean = raw.iter().sum::<f32>() / raw.len() as f32;
        let centred: Vec<f32> = raw.iter().map(|v| v - mean).collect();

        debug!(dim = raw.len(), "Generating stub embedding");

        // Flat images have nothing left after centring.
        if centred.iter().all(|v| v.abs() < 1e-4) {
            l2_normalize(raw)
        } else {
            l2_normalize(centred)
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub { .. })
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }

    pub fn device(&self) -> &Device {
        match &self.backend {
            EmbedderBackend::Model { device, .. } | EmbedderBackend::Stub { device } => device,
        }
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}

/// Resizes to the tower's input size and applies CLIP mean/std normalization.
fn preprocess(image: &DynamicImage, size: usize, device: &Device) -> Result<Tensor, EmbeddingError> {
    let side = u32::try_from(size).map_err(|_| EmbeddingError::PreprocessFailed {
        reason: format!("unsupported image size {size}"),
    })?;

    let rgb = image
        .resize_exact(side, side, FilterType::Triangle)
        .to_rgb8()
        .into_raw();

    let mean = Tensor::new(&CLIP_MEAN, device)?.reshape((3, 1, 1))?;
    let std = Tensor::new(&CLIP_STD, device)?.reshape((3, 1, 1))?;

    let pixels = Tensor::from_vec(rgb, (size, size, 3), device)?
        .permute((2, 0, 1))?
        .to_dtype(DType::F32)?
        .affine(1.0 / 255.0, 0.0)?
        .broadcast_sub(&mean)?
        .broadcast_div(&std)?
        .unsqueeze(0)?;

    Ok(pixels)
}

pub(crate) fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
