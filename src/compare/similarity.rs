//! The four similarity signals, each normalized to [0, 1].

use std::collections::HashSet;

use crate::capabilities::cosine_similarity;
use crate::models::TextStats;

/// Longest-common-subsequence ratio over chars: `2·LCS / (len_a + len_b)`.
///
/// 1.0 for two empty texts, 0.0 when exactly one side is empty.
pub fn lcs_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Two-row DP keeps memory linear in the shorter text.
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for lc in long.iter() {
        for (j, sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let lcs = prev[short.len()];
    2.0 * lcs as f64 / (a.len() + b.len()) as f64
}

/// Jaccard index over lowercased whitespace-token sets. 0.0 when the union
/// is empty.
pub fn jaccard_words(a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let set_b: HashSet<String> = b.to_lowercase().split_whitespace().map(String::from).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Cosine similarity of the embeddings, clamped to [0, 1]. 0.0 when either
/// embedding is empty or lengths differ.
pub fn semantic(a: &[f32], b: &[f32]) -> f64 {
    (cosine_similarity(a, b) as f64).clamp(0.0, 1.0)
}

/// Mean `min/max` ratio over word, sentence, and paragraph counts, with
/// 1.0 when both counts of a metric are zero.
pub fn structural(a: &TextStats, b: &TextStats) -> f64 {
    let pairs = [
        (a.word_count, b.word_count),
        (a.sentence_count, b.sentence_count),
        (a.paragraph_count, b.paragraph_count),
    ];

    let sum: f64 = pairs
        .iter()
        .map(|&(x, y)| {
            if x == 0 && y == 0 {
                1.0
            } else {
                x.min(y) as f64 / x.max(y) as f64
            }
        })
        .sum();

    sum / pairs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::text_stats;

    #[test]
    fn test_lcs_identical_is_one() {
        assert_eq!(lcs_ratio("same text", "same text"), 1.0);
    }

    #[test]
    fn test_lcs_disjoint_alphabets() {
        assert_eq!(lcs_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_lcs_empty_cases() {
        assert_eq!(lcs_ratio("", ""), 1.0);
        assert_eq!(lcs_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_lcs_partial_overlap() {
        // LCS("abcd", "abxd") = 3 → 2*3/8
        let ratio = lcs_ratio("abcd", "abxd");
        assert!((ratio - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard_words("one two", "ONE two"), 1.0);
        assert_eq!(jaccard_words("one two", "three four"), 0.0);
        assert!((jaccard_words("one two", "two three") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(jaccard_words("", ""), 0.0);
    }

    #[test]
    fn test_structural_both_empty_is_one() {
        let empty = text_stats("");
        assert_eq!(structural(&empty, &empty), 1.0);
    }

    #[test]
    fn test_structural_identical_is_one() {
        let stats = text_stats("One two. Three four.\n\nFive six.");
        assert_eq!(structural(&stats, &stats), 1.0);
    }

    #[test]
    fn test_structural_bounds() {
        let a = text_stats("Short note.");
        let b = text_stats("A considerably longer text. It has more sentences. And more words.\n\nTwo paragraphs even.");
        let score = structural(&a, &b);
        assert!((0.0..=1.0).contains(&score));
        assert!(score < 1.0);
    }

    #[test]
    fn test_semantic_empty_is_zero() {
        assert_eq!(semantic(&[], &[]), 0.0);
    }
}
