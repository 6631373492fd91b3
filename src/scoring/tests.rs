use super::*;
use crate::similarity::SimilarityScore;

fn s(v: f64) -> SimilarityScore {
    SimilarityScore::new(v)
}

#[test]
fn test_fuse_weights() {
    let fused = FusedSimilarity::fuse(s(1.0), s(0.0), s(0.0));
    assert!((fused.value() - 0.2).abs() < 1e-12);

    let fused = FusedSimilarity::fuse(s(0.0), s(1.0), s(0.0));
    assert!((fused.value() - 0.4).abs() < 1e-12);

    let fused = FusedSimilarity::fuse(s(0.0), s(0.0), s(1.0));
    assert!((fused.value() - 0.4).abs() < 1e-12);
}

#[test]
fn test_fuse_all_max_is_one() {
    let fused = FusedSimilarity::fuse(s(1.0), s(1.0), s(1.0));
    assert!((fused.value() - 1.0).abs() < 1e-12);
    assert!(fused.value() <= 1.0);
}

#[test]
fn test_fuse_stays_in_unit_interval() {
    let grid = [0.0, 0.13, 0.5, 0.77, 1.0];
    for &e in &grid {
        for &p in &grid {
            for &q in &grid {
                let fused = FusedSimilarity::fuse(s(e), s(p), s(q)).value();
                assert!((0.0..=1.0).contains(&fused), "{e} {p} {q} -> {fused}");
            }
        }
    }
}

#[test]
fn test_fuse_monotonic_in_each_component() {
    let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
    let fixed = [0.3, 0.6];
    for &a in &fixed {
        for &b in &fixed {
            let mut last = [f64::MIN; 3];
            for &x in &steps {
                let scores = [
                    FusedSimilarity::fuse(s(x), s(a), s(b)).value(),
                    FusedSimilarity::fuse(s(a), s(x), s(b)).value(),
                    FusedSimilarity::fuse(s(a), s(b), s(x)).value(),
                ];
                for (i, score) in scores.iter().enumerate() {
                    assert!(*score >= last[i]);
                    last[i] = *score;
                }
            }
        }
    }
}

#[test]
fn test_confidence_score_equals_fused() {
    let fused = FusedSimilarity::fuse(s(0.4), s(0.9), s(0.65));
    assert_eq!(fused.confidence_score(), fused.value());
}

#[test]
fn test_breakdown_fuse_matches_direct() {
    let breakdown = SimilarityBreakdown::new(s(0.9), s(0.8), s(0.7));
    assert_eq!(
        breakdown.fuse(),
        FusedSimilarity::fuse(s(0.9), s(0.8), s(0.7))
    );
}

#[test]
fn test_is_matched_is_strict() {
    let above = FusedSimilarity::fuse(s(0.71), s(0.71), s(0.71));
    assert!(above.is_matched());

    let below = FusedSimilarity::fuse(s(0.69), s(0.69), s(0.69));
    assert!(!below.is_matched());

    // A "high" tier score can still fall short of the match threshold.
    let high_unmatched = FusedSimilarity::fuse(s(0.65), s(0.65), s(0.65));
    assert_eq!(high_unmatched.confidence_level(), ConfidenceLevel::High);
    assert!(!high_unmatched.is_matched());
}

#[test]
fn test_confidence_level_boundaries_resolve_upward() {
    assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::VeryHigh);
    assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::High);
    assert_eq!(ConfidenceLevel::from_score(0.4), ConfidenceLevel::Moderate);
    assert_eq!(ConfidenceLevel::from_score(0.399_999), ConfidenceLevel::Low);
}

#[test]
fn test_confidence_level_interior_values() {
    assert_eq!(ConfidenceLevel::from_score(1.0), ConfidenceLevel::VeryHigh);
    assert_eq!(ConfidenceLevel::from_score(0.79), ConfidenceLevel::High);
    assert_eq!(ConfidenceLevel::from_score(0.59), ConfidenceLevel::Moderate);
    assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
}

#[test]
fn test_confidence_level_serializes_as_words() {
    assert_eq!(
        serde_json::to_string(&ConfidenceLevel::VeryHigh).unwrap(),
        "\"very high\""
    );
    assert_eq!(
        serde_json::to_string(&ConfidenceLevel::Moderate).unwrap(),
        "\"moderate\""
    );
    assert_eq!(ConfidenceLevel::Low.to_string(), "low");
}

#[test]
fn test_match_description_tiers() {
    assert_eq!(
        MatchDescription::from_score(0.8),
        MatchDescription::VeryWellMatched
    );
    assert_eq!(
        MatchDescription::from_score(0.6),
        MatchDescription::MostlyMatched
    );
    assert_eq!(MatchDescription::from_score(0.4), MatchDescription::WeakMatch);
    assert_eq!(MatchDescription::from_score(0.1), MatchDescription::Unmatched);
}

#[test]
fn test_match_description_text() {
    assert!(MatchDescription::VeryWellMatched.text().contains("very well"));
    assert!(MatchDescription::MostlyMatched.text().contains("mostly"));
    assert!(MatchDescription::WeakMatch.text().contains("weakly"));
    assert!(MatchDescription::Unmatched.text().contains("does not match"));
}

#[test]
fn test_fused_helpers_delegate_to_tiers() {
    let fused = FusedSimilarity::fuse(s(0.5), s(0.5), s(0.5));
    assert_eq!(fused.confidence_level(), ConfidenceLevel::Moderate);
    assert_eq!(fused.match_description(), MatchDescription::WeakMatch);
}
