use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use image_compare::Algorithm;
use tracing::debug;

use super::SimilarityEstimator;
use super::error::SimilarityError;
use super::types::{EstimatorKind, SimilarityScore};
use crate::constants::SSIM_CANONICAL_SIDE;
use crate::imaging::NormalizedImage;

/// Luma at the canonical resolution, so scores do not depend on original size.
pub fn canonical_luma(image: &DynamicImage) -> GrayImage {
    imageops::resize(
        &image.to_luma8(),
        SSIM_CANONICAL_SIDE,
        SSIM_CANONICAL_SIDE,
        FilterType::Triangle,
    )
}

pub fn structural_similarity(
    left: &DynamicImage,
    right: &DynamicImage,
) -> Result<SimilarityScore, SimilarityError> {
    if left.width() == 0 || left.height() == 0 || right.width() == 0 || right.height() == 0 {
        return Err(SimilarityError::Degenerate {
            reason: "image has no pixels".to_string(),
        });
    }

    let left = canonical_luma(left);
    let right = canonical_luma(right);

    let result = image_compare::gray_similarity_structure(&Algorithm::MSSIMSimple, &left, &right)
        .map_err(|e| SimilarityError::ComparisonFailed {
            reason: format!("{e:?}"),
        })?;

    Ok(SimilarityScore::new(result.score))
}

/// Windowed structural similarity estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SsimEstimator;

impl SimilarityEstimator for SsimEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Structural
    }

    fn estimate(
        &self,
        left: &NormalizedImage<'_>,
        right: &NormalizedImage<'_>,
    ) -> Result<SimilarityScore, SimilarityError> {
        let left_pixels = left.pixels()?;
        let right_pixels = right.pixels()?;
        let score = structural_similarity(&left_pixels, &right_pixels)?;
        debug!(score = score.value(), "Structural similarity");
        Ok(score)
    }
}
