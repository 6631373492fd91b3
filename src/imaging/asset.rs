use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use super::error::ImagingError;

/// Caller-supplied image reference. Never mutated by the pipeline.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageAsset {
    /// Image file on the local filesystem.
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG, WebP).
    Bytes(Vec<u8>),
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageAsset::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageAsset::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

impl ImageAsset {
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        ImageAsset::Path(path.into())
    }

    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Self {
        ImageAsset::Bytes(bytes.into())
    }

    /// Human-readable origin used in logs and error messages.
    pub fn origin(&self) -> String {
        match self {
            ImageAsset::Path(path) => path.display().to_string(),
            ImageAsset::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageAsset::Path(path) => Some(path),
            ImageAsset::Bytes(_) => None,
        }
    }

    /// Decodes the asset (format guessed from content).
    pub fn decode(&self) -> Result<DynamicImage, ImagingError> {
        let decoded = match self {
            ImageAsset::Path(path) => image::open(path),
            ImageAsset::Bytes(bytes) => image::load_from_memory(bytes),
        };

        decoded.map_err(|source| ImagingError::Decode {
            origin: self.origin(),
            source,
        })
    }
}

/// Request-scoped, background-removed view of an [`ImageAsset`].
///
/// When the normalizer could not decode the asset it passes the original through
/// untouched; [`pixels`](Self::pixels) then retries the decode and reports the failure
/// to whichever estimator asked.
#[derive(Debug)]
pub struct NormalizedImage<'a> {
    asset: &'a ImageAsset,
    pixels: Option<DynamicImage>,
    background_removed: bool,
}

impl<'a> NormalizedImage<'a> {
    pub(crate) fn new(asset: &'a ImageAsset, pixels: DynamicImage, background_removed: bool) -> Self {
        Self {
            asset,
            pixels: Some(pixels),
            background_removed,
        }
    }

    /// Wraps the original asset without any normalization.
    pub fn passthrough(asset: &'a ImageAsset) -> Self {
        Self {
            asset,
            pixels: None,
            background_removed: false,
        }
    }

    pub fn asset(&self) -> &ImageAsset {
        self.asset
    }

    pub fn is_decoded(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn background_removed(&self) -> bool {
        self.background_removed
    }

    pub fn pixels(&self) -> Result<Cow<'_, DynamicImage>, ImagingError> {
        match &self.pixels {
            Some(pixels) => Ok(Cow::Borrowed(pixels)),
            None => self.asset.decode().map(Cow::Owned),
        }
    }
}
