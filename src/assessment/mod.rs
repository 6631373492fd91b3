//! Overall narrative for one analysis.


use crate::constants::{MISMATCH_THRESHOLD, WELL_MATCHED_THRESHOLD};
use crate::scoring::FusedSimilarity;
use crate::sentiment::{SentimentLabel, SentimentResult};

pub const MISMATCH_WARNING: &str =
    "Warning: the review image does not match the product. The review needs verification.";
pub const WELL_MATCHED: &str = "The review image matches the product well";
pub const SOMEWHAT_SIMILAR: &str = "The review image is somewhat similar to the product";
pub const FAILURE_NARRATIVE: &str = "Analysis could not be completed.";

/// Builds the overall assessment.
///
/// Below [`MISMATCH_THRESHOLD`] the warning replaces everything, sentiment included.
/// Otherwise the tier phrase carries the confidence as a percentage, and a known
/// sentiment label appends its clause.
pub fn synthesize(
    fused: FusedSimilarity,
    confidence: f64,
    sentiment: Option<&SentimentResult>,
) -> String {
    if fused.value() < MISMATCH_THRESHOLD {
        return MISMATCH_WARNING.to_string();
    }

    let base = if fused.value() >= WELL_MATCHED_THRESHOLD {
        WELL_MATCHED
    } else {
        SOMEWHAT_SIMILAR
    };

    let mut narrative = format!("{base} | confidence: {:.1}%", confidence * 100.0);

    if let Some(clause) = sentiment.and_then(|s| sentiment_clause(s.label)) {
        narrative.push_str(" | ");
        narrative.push_str(clause);
    }

    narrative
}

fn sentiment_clause(label: SentimentLabel) -> Option<&'static str> {
    label.is_known().then(|| label.description())
}
