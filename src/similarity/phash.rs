use std::f64::consts::PI;

use image::DynamicImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use super::SimilarityEstimator;
use super::error::SimilarityError;
use super::types::{EstimatorKind, SimilarityScore};
use crate::constants::{PHASH_SAMPLE_SIDE, PHASH_SIDE};
use crate::imaging::NormalizedImage;

const HASH_BITS: usize = PHASH_SIDE * PHASH_SIDE;

/// DCT perceptual hash: an `L x L` bit matrix (`L` = [`PHASH_SIDE`]) stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerceptualHash {
    bits: u64,
}

impl PerceptualHash {
    pub fn compute(image: &DynamicImage) -> Result<Self, SimilarityError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(SimilarityError::Degenerate {
                reason: "image has no pixels".to_string(),
            });
        }

        let side = PHASH_SAMPLE_SIDE as u32;
        let sample = imageops::resize(&image.to_luma8(), side, side, FilterType::Lanczos3);
        let pixels: Vec<f64> = sample.into_raw().into_iter().map(f64::from).collect();

        let coefficients = low_frequency_dct(&pixels);
        let median = median(&coefficients);

        let bits = coefficients
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > median)
            .fold(0u64, |acc, (i, _)| acc | (1u64 << i));

        Ok(Self { bits })
    }

    pub fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn hamming_distance(&self, other: &PerceptualHash) -> u32 {
        (self.bits ^ other.bits).count_ones()
    }

    /// `1 - d / L^2`, with `d` the Hamming distance and `L` the hash side length.
    pub fn similarity(&self, other: &PerceptualHash) -> SimilarityScore {
        let distance = f64::from(self.hamming_distance(other));
        let side = PHASH_SIDE as f64;
        SimilarityScore::new(1.0 - distance / (side * side))
    }
}

impl std::fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.bits)
    }
}

/// Top-left `L x L` block of the 2-D DCT-II of a square sample (DC included).
fn low_frequency_dct(pixels: &[f64]) -> [f64; HASH_BITS] {
    let n = PHASH_SAMPLE_SIDE;
    let mut basis = vec![0.0f64; PHASH_SIDE * n];
    for k in 0..PHASH_SIDE {
        for i in 0..n {
            basis[k * n + i] = (PI * k as f64 * (2 * i + 1) as f64 / (2 * n) as f64).cos();
        }
    }

    // Along x first: rows[y][v] = sum_x p[y][x] * basis[v][x]
    let mut rows = vec![0.0f64; n * PHASH_SIDE];
    for y in 0..n {
        for v in 0..PHASH_SIDE {
            rows[y * PHASH_SIDE + v] = (0..n)
                .map(|x| pixels[y * n + x] * basis[v * n + x])
                .sum();
        }
    }

    let mut out = [0.0f64; HASH_BITS];
    for u in 0..PHASH_SIDE {
        for v in 0..PHASH_SIDE {
            out[u * PHASH_SIDE + v] = (0..n)
                .map(|y| rows[y * PHASH_SIDE + v] * basis[u * n + y])
                .sum();
        }
    }
    out
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Perceptual-hash estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhashEstimator;

impl SimilarityEstimator for PhashEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::PerceptualHash
    }

    fn estimate(
        &self,
        left: &NormalizedImage<'_>,
        right: &NormalizedImage<'_>,
    ) -> Result<SimilarityScore, SimilarityError> {
        let left_pixels = left.pixels()?;
        let right_pixels = right.pixels()?;
        let left_hash = PerceptualHash::compute(&left_pixels)?;
        let right_hash = PerceptualHash::compute(&right_pixels)?;
        let score = left_hash.similarity(&right_hash);

        debug!(
            left = %left_hash,
            right = %right_hash,
            distance = left_hash.hamming_distance(&right_hash),
            score = score.value(),
            "Perceptual hash similarity"
        );

        Ok(score)
    }
}
