use std::sync::Arc;

use tracing::{debug, warn};

use super::asset::{ImageAsset, NormalizedImage};
use super::matting::BackgroundRemover;

/// Background removal stage applied to each image before comparison.
///
/// Never fails: undecodable assets are passed through unchanged and a failing
/// remover falls back to the decoded original.
#[derive(Clone)]
pub struct ImageNormalizer {
    remover: Option<Arc<dyn BackgroundRemover>>,
}

impl std::fmt::Debug for ImageNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageNormalizer")
            .field("remover", &self.remover.as_ref().map(|r| r.name()))
            .finish()
    }
}

impl ImageNormalizer {
    pub fn new(remover: Arc<dyn BackgroundRemover>) -> Self {
        Self {
            remover: Some(remover),
        }
    }

    /// Decodes only; no background removal.
    pub fn disabled() -> Self {
        Self { remover: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.remover.is_some()
    }

    pub fn normalize<'a>(&self, asset: &'a ImageAsset) -> NormalizedImage<'a> {
        let decoded = match asset.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(error = %e, "Could not decode image for normalization, using original");
                return NormalizedImage::passthrough(asset);
            }
        };

        let Some(remover) = &self.remover else {
            return NormalizedImage::new(asset, decoded, false);
        };

        match remover.remove(&decoded) {
            Ok(matted) => {
                debug!(
                    origin = %asset.origin(),
                    remover = remover.name(),
                    "Image normalized"
                );
                NormalizedImage::new(asset, matted, true)
            }
            Err(e) => {
                warn!(
                    origin = %asset.origin(),
                    error = %e,
                    "Background removal failed, using decoded original"
                );
                NormalizedImage::new(asset, decoded, false)
            }
        }
    }
}
