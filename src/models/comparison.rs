//! Pairwise comparison results.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Identity of one side of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentIdentity {
    pub file_name: String,
    pub fingerprint: String,
}

/// The four similarity signals, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimilarityScores {
    /// Longest-common-subsequence ratio over raw text.
    pub character: f64,
    /// Jaccard index over lowercased token sets.
    pub word: f64,
    /// Clamped cosine similarity of the embeddings.
    pub semantic: f64,
    /// Mean min/max ratio over word, sentence, and paragraph counts.
    pub structural: f64,
}

impl SimilarityScores {
    /// Unweighted mean of the four signals.
    pub fn overall(&self) -> f64 {
        (self.character + self.word + self.semantic + self.structural) / 4.0
    }
}

/// Content present on one side but not the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Differences {
    /// Sentences only in the first document (capped).
    pub unique_to_a: Vec<String>,
    /// Sentences only in the second document (capped).
    pub unique_to_b: Vec<String>,
    /// Sentence count delta, first minus second.
    pub sentence_count_delta: i64,
    /// Character count delta, first minus second.
    pub char_count_delta: i64,
}

/// Content shared by both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonElements {
    /// Intersection of lowercased word sets, sorted, capped.
    pub shared_words: Vec<String>,
    /// Full size of the word intersection before capping.
    pub shared_word_count: usize,
    /// Intersection of lowercased sentence sets, sorted, capped.
    pub shared_sentences: Vec<String>,
    /// Unique-word total of the first document.
    pub unique_words_a: usize,
    /// Unique-word total of the second document.
    pub unique_words_b: usize,
}

/// Result of comparing two analyzed documents.
///
/// Read-only once produced. All score fields are symmetric under argument
/// order; the id is a pure function of the unordered fingerprint pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub comparison_id: String,
    pub document_a: DocumentIdentity,
    pub document_b: DocumentIdentity,
    pub scores: SimilarityScores,
    pub differences: Differences,
    pub common: CommonElements,
    /// Human-readable multi-line summary.
    pub summary: String,
}

/// Derive the comparison id from two fingerprints.
///
/// The fingerprints are ordered lexicographically before hashing, so the id
/// does not depend on argument order.
pub fn comparison_id(fingerprint_a: &str, fingerprint_b: &str) -> String {
    let (lo, hi) = if fingerprint_a <= fingerprint_b {
        (fingerprint_a, fingerprint_b)
    } else {
        (fingerprint_b, fingerprint_a)
    };
    let mut hasher = Sha256::new();
    hasher.update(lo.as_bytes());
    hasher.update(hi.as_bytes());
    hex::encode(hasher.finalize())
}
