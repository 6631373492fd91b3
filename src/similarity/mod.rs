//! The three independent image-similarity signals.
//!
//! Each estimator is a pure function of two [`NormalizedImage`]s (plus read-only model
//! weights for [`EmbeddingEstimator`]) and returns an explicit `Result`. Callers decide
//! how a failure degrades; see [`crate::analyzer`].

pub mod embedding;
pub mod error;
pub mod phash;
pub mod ssim;
pub mod types;


pub use embedding::{EmbeddingEstimator, cosine_similarity, rescale_cosine};
pub use error::SimilarityError;
pub use phash::{PerceptualHash, PhashEstimator};
pub use ssim::{SsimEstimator, canonical_luma, structural_similarity};
pub use types::{EstimatorKind, SimilarityScore};

use crate::imaging::NormalizedImage;

/// Compares two normalized images and yields one [`SimilarityScore`].
pub trait SimilarityEstimator {
    fn kind(&self) -> EstimatorKind;

    fn estimate(
        &self,
        left: &NormalizedImage<'_>,
        right: &NormalizedImage<'_>,
    ) -> Result<SimilarityScore, SimilarityError>;
}
