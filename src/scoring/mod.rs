//! Score fusion and tiering.
//!
//! [`FusedSimilarity`] combines embedding, perceptual-hash and structural scores with the
//! fixed weights from [`crate::constants`]. Everything downstream (match flag, confidence
//! tier, match description) is a pure function of that one number.

pub mod fusion;
pub mod types;

#[cfg(test)]
mod tests;

pub use fusion::{FusedSimilarity, SimilarityBreakdown};
pub use types::{ConfidenceLevel, MatchDescription};
