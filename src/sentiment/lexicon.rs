//! Word-list scorer backing the stub classifier.

const POSITIVE_STEMS: &[&str] = &[
    "great", "good", "love", "excellent", "perfect", "recommend", "amazing", "awesome", "best",
    "nice", "happy", "satisf", "fantastic", "sturdy", "comfortable", "beautiful", "works",
    "좋", "최고", "만족", "추천", "훌륭",
];

const NEGATIVE_STEMS: &[&str] = &[
    "bad", "terrible", "awful", "broke", "poor", "worst", "hate", "disappoint", "refund", "waste",
    "defect", "fake", "flimsy", "useless", "return", "별로", "최악", "실망", "환불", "불량",
];

const NEGATORS: &[&str] = &["not", "never", "no", "hardly", "안", "못"];

/// Logistic steepness applied to the positive/negative word margin.
const MARGIN_SCALE: f64 = 1.5;

fn matches_any(word: &str, stems: &[&str]) -> bool {
    stems.iter().any(|stem| word.starts_with(stem))
}

/// Positive-minus-negative hit count; a negator flips the next sentiment word.
pub fn margin(text: &str) -> i32 {
    let lower = text.to_lowercase();
    let mut margin = 0;
    let mut negated = false;

    for word in lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        if NEGATORS.contains(&word) {
            negated = true;
            continue;
        }

        let polarity = if matches_any(word, POSITIVE_STEMS) {
            1
        } else if matches_any(word, NEGATIVE_STEMS) {
            -1
        } else {
            continue;
        };

        margin += if negated { -polarity } else { polarity };
        negated = false;
    }

    margin
}

/// Probability that `text` is positive.
pub fn positive_probability(text: &str) -> f64 {
    let m = f64::from(margin(text));
    1.0 / (1.0 + (-MARGIN_SCALE * m).exp())
}
