//! Cross-cutting, shared constants.
//!
//! Fusion weights and tier thresholds are fixed; every module that scores or describes
//! a result reads them from here.
//!
//! # Weight Invariants
//!
//! [`EMBEDDING_WEIGHT`] + [`PHASH_WEIGHT`] + [`SSIM_WEIGHT`] is `1.0` and every weight is
//! positive. The fused score is reused unchanged as the confidence score.

pub const EMBEDDING_WEIGHT: f64 = 0.2;
pub const PHASH_WEIGHT: f64 = 0.4;
pub const SSIM_WEIGHT: f64 = 0.4;

/// Fused score must be strictly greater than this to count as a match.
pub const MATCH_THRESHOLD: f64 = 0.7;

/// Lower bounds (inclusive) of the confidence / description tiers.
pub const TIER_VERY_HIGH: f64 = 0.8;
pub const TIER_HIGH: f64 = 0.6;
pub const TIER_MODERATE: f64 = 0.4;

/// Below this the assessment ignores sentiment and warns about a mismatch.
pub const MISMATCH_THRESHOLD: f64 = TIER_MODERATE;

/// At or above this the assessment reports a good match.
pub const WELL_MATCHED_THRESHOLD: f64 = 0.7;

/// Side length of the perceptual hash bit matrix (`L`); the hash holds `L * L` bits.
pub const PHASH_SIDE: usize = 8;

/// Side length the image is reduced to before the DCT.
pub const PHASH_SAMPLE_SIDE: usize = 32;

/// Canonical square resolution for structural similarity.
pub const SSIM_CANONICAL_SIDE: u32 = 256;

/// Input resolution of the CLIP ViT-B/32 vision tower.
pub const CLIP_IMAGE_SIZE: usize = 224;

pub const CLIP_MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];
pub const CLIP_STD: [f32; 3] = [0.268_629_54, 0.261_302_6, 0.275_777_1];

/// Side of the RGB thumbnail the stub embedder flattens (3 * 16 * 16 dims).
pub const STUB_EMBEDDING_SIDE: u32 = 16;

pub const SENTIMENT_MAX_SEQ_LEN: usize = 512;

/// Neutral confidence reported when sentiment analysis fails.
pub const SENTIMENT_FAILURE_SCORE: f64 = 0.5;

/// Default per-channel colour distance for border-keyed background removal.
pub const DEFAULT_MATTE_TOLERANCE: u8 = 40;

/// Border pixels may deviate from the key colour by at most this on average.
pub const DEFAULT_BORDER_UNIFORMITY: f64 = 12.0;

/// Keying that leaves less than this share of pixels is discarded.
pub const MIN_SUBJECT_FRACTION: f64 = 0.01;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fusion_weights_sum_to_one() {
        let sum = EMBEDDING_WEIGHT + PHASH_WEIGHT + SSIM_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fusion_weights_positive() {
        for weight in [EMBEDDING_WEIGHT, PHASH_WEIGHT, SSIM_WEIGHT] {
            assert!(weight > 0.0);
        }
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(TIER_VERY_HIGH > TIER_HIGH);
        assert!(TIER_HIGH > TIER_MODERATE);
        assert!(MATCH_THRESHOLD > MISMATCH_THRESHOLD);
    }
}
