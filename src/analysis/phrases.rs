//! Key-phrase extraction.
//!
//! With an NLP capability: noun chunks of at least two words and more than
//! five characters, deduplicated. Without one: consecutive
//! capitalized-word pairs found by regex.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Consecutive capitalized-word pairs, e.g. "Service Agreement".
static CAPITALIZED_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").unwrap());

/// Regex fallback used when no NLP capability is registered.
///
/// Deduplicates in first-occurrence order and caps the result.
pub fn fallback_key_phrases(text: &str, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut phrases = Vec::new();

    for m in CAPITALIZED_PAIR.find_iter(text) {
        let phrase = m.as_str().to_string();
        if seen.insert(phrase.clone()) {
            phrases.push(phrase);
            if phrases.len() >= cap {
                break;
            }
        }
    }

    phrases
}

/// Filter noun chunks from the NLP capability: at least two words, more
/// than five characters, deduplicated in order, capped.
pub fn filter_noun_chunks(chunks: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut phrases = Vec::new();

    for chunk in chunks {
        let chunk = chunk.trim().to_string();
        if chunk.split_whitespace().count() < 2 || chunk.len() <= 5 {
            continue;
        }
        if seen.insert(chunk.clone()) {
            phrases.push(chunk);
            if phrases.len() >= cap {
                break;
            }
        }
    }

    phrases
}
