//! Image references and subject isolation.
//!
//! - [`ImageAsset`] is the caller's raw image (path or bytes).
//! - [`ImageNormalizer`] removes the background to produce a [`NormalizedImage`].
//! - [`BackgroundRemover`] is the seam for plugging in a matting model;
//!   [`BorderKeyMatting`] is the built-in implementation.

pub mod asset;
pub mod error;
pub mod matting;
pub mod normalize;


pub use asset::{ImageAsset, NormalizedImage};
pub use error::ImagingError;
pub use matting::{BackgroundRemover, BorderKeyMatting, MattingConfig};
pub use normalize::ImageNormalizer;
