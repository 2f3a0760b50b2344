//! Text statistics and the readability heuristic.
//!
//! Sentence splitting is a plain '.'-split that discards empty fragments.
//! It mishandles abbreviations and decimal numbers; this inaccuracy is kept
//! deliberately for behavioral parity and can be replaced behind
//! [`split_sentences`] without touching callers.

use crate::models::TextStats;

/// Split text into trimmed, non-empty sentence fragments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split text into trimmed, non-empty paragraphs on blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Count syllables in one word: vowel-group transitions with `y` as a
/// vowel, minus one for a trailing silent `e`, floor 1.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count: isize = 0;
    let mut prev_was_vowel = false;

    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count -= 1;
    }

    count.max(1) as usize
}

/// Simplified Flesch Reading Ease, clamped to [0, 100].
///
/// `206.835 − 1.015·(words/sentences) − 84.6·(syllables/words)`. Returns
/// 0.0 for text with no words or no sentences.
pub fn readability(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    let sentence_count = split_sentences(text).len();

    if words.is_empty() || sentence_count == 0 {
        return 0.0;
    }

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let score = 206.835
        - 1.015 * (words.len() as f64 / sentence_count as f64)
        - 84.6 * (syllables as f64 / words.len() as f64);

    score.clamp(0.0, 100.0)
}

/// Compute all basic statistics for a text.
pub fn text_stats(text: &str) -> TextStats {
    let char_count = text.chars().count();
    let word_count = text.split_whitespace().count();
    let sentence_count = split_sentences(text).len();
    let paragraph_count = split_paragraphs(text).len();

    TextStats {
        char_count,
        word_count,
        sentence_count,
        paragraph_count,
        avg_words_per_sentence: word_count as f64 / sentence_count.max(1) as f64,
        avg_chars_per_word: char_count as f64 / word_count.max(1) as f64,
        readability: readability(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_discards_empty() {
        let sentences = split_sentences("First. Second.. Third.");
        assert_eq!(sentences, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("agreement"), 3);
        // Trailing silent e is discounted.
        assert_eq!(count_syllables("side"), 1);
        // Floor of 1 even for vowelless tokens.
        assert_eq!(count_syllables("tsk"), 1);
        // y counts as a vowel.
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_readability_bounds() {
        let simple = "The cat sat. The dog ran. It was fun.";
        let score = readability(simple);
        assert!((0.0..=100.0).contains(&score));
        assert!(score > 60.0, "simple text should score high, got {score}");
    }

    #[test]
    fn test_readability_empty_is_zero() {
        assert_eq!(readability(""), 0.0);
        assert_eq!(readability("   "), 0.0);
    }

    #[test]
    fn test_stats_counts() {
        let stats = text_stats("One two three. Four five.\n\nSix seven.");
        assert_eq!(stats.word_count, 7);
        assert_eq!(stats.sentence_count, 3);
        assert_eq!(stats.paragraph_count, 2);
        assert!((stats.avg_words_per_sentence - 7.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_stats_degenerate() {
        let stats = text_stats("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.readability, 0.0);
        assert_eq!(stats.avg_words_per_sentence, 0.0);
    }
}
