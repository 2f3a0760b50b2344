//! Lexicon-based sentiment scoring.
//!
//! Counts occurrences of fixed positive/negative indicator words in the
//! lowercased text. The side with more hits wins; confidence is the
//! winning share of all hits. Ties and indicator-free text are neutral at
//! 0.5.

use crate::models::{Sentiment, SentimentLabel};

const POSITIVE_WORDS: &[&str] = &[
    "good", "excellent", "positive", "approve", "accept", "agree", "success",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "negative", "reject", "deny", "disagree", "fail", "error",
];

/// Score the sentiment of a text.
pub fn analyze(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();

    let positive: usize = POSITIVE_WORDS
        .iter()
        .map(|w| lowered.matches(w).count())
        .sum();
    let negative: usize = NEGATIVE_WORDS
        .iter()
        .map(|w| lowered.matches(w).count())
        .sum();

    let total = positive + negative;
    let (label, confidence) = if total == 0 || positive == negative {
        (SentimentLabel::Neutral, 0.5)
    } else if positive > negative {
        (SentimentLabel::Positive, positive as f64 / total as f64)
    } else {
        (SentimentLabel::Negative, negative as f64 / total as f64)
    };

    Sentiment {
        label,
        confidence,
        positive_indicators: positive,
        negative_indicators: negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let s = analyze("An excellent outcome. We approve and accept the good result.");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert_eq!(s.negative_indicators, 0);
        assert_eq!(s.confidence, 1.0);
    }

    #[test]
    fn test_negative_text() {
        let s = analyze("A poor filing. We reject and deny the bad request.");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert!(s.confidence > 0.5);
    }

    #[test]
    fn test_tie_is_neutral() {
        let s = analyze("good bad");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.confidence, 0.5);
        assert_eq!(s.positive_indicators, 1);
        assert_eq!(s.negative_indicators, 1);
    }

    #[test]
    fn test_no_indicators_is_neutral() {
        let s = analyze("The document describes a procedure.");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.confidence, 0.5);
        assert_eq!(s.positive_indicators + s.negative_indicators, 0);
    }
}
