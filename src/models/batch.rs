//! Batch run results and aggregated insights.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::DocumentCategory;

/// Outcome status of one batch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Error,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Per-document outcome, one per input path, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub status: OutcomeStatus,
    pub fingerprint: Option<String>,
    pub category: Option<DocumentCategory>,
    pub word_count: Option<usize>,
    pub error: Option<String>,
}

impl DocumentOutcome {
    pub fn error(path: PathBuf, message: String) -> Self {
        Self {
            path,
            status: OutcomeStatus::Error,
            fingerprint: None,
            category: None,
            word_count: None,
            error: Some(message),
        }
    }
}

/// Cross-document comparison output, present when at least two documents
/// were analyzed successfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    /// Square matrix of pairwise semantic similarity over successful
    /// documents, symmetric, diagonal 1.0.
    pub similarity_matrix: Vec<Vec<f64>>,
    /// Histogram of classified categories among successful documents.
    pub type_distribution: BTreeMap<String, usize>,
}

/// Readability and length quality buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Documents with readability above the configured good threshold.
    pub good_readability: usize,
    /// Documents with readability below the configured poor threshold.
    pub poor_readability: usize,
    /// Max minus min word count across successful documents.
    pub word_count_spread: usize,
}

/// Aggregated insights over the successful documents of a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchInsights {
    pub total_documents: usize,
    pub total_words: usize,
    pub average_word_count: f64,
    /// Mean readability over documents with a positive score.
    pub average_readability: f64,
    pub document_types: BTreeMap<String, usize>,
    pub quality: QualityAssessment,
}

/// Result of one batch run. Immutable after construction; always carries
/// exactly one outcome per input path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: String,
    pub started_at: DateTime<Utc>,
    pub document_count: usize,
    pub documents: Vec<DocumentOutcome>,
    pub comparative: Option<ComparativeAnalysis>,
    pub insights: BatchInsights,
    pub processing_errors: Vec<String>,
    pub elapsed_ms: u64,
}

/// Derive a batch id from the ordered input path list.
pub fn batch_id(paths: &[impl AsRef<Path>]) -> String {
    let mut hasher = Sha256::new();
    for path in paths {
        hasher.update(path.as_ref().to_string_lossy().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_id_depends_on_order() {
        let forward = batch_id(&["a.txt", "b.txt"]);
        let reverse = batch_id(&["b.txt", "a.txt"]);
        assert_ne!(forward, reverse);
        assert_eq!(forward, batch_id(&["a.txt", "b.txt"]));
    }

    #[test]
    fn test_error_outcome() {
        let outcome = DocumentOutcome::error(PathBuf::from("x.txt"), "missing".to_string());
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.fingerprint.is_none());
        assert_eq!(outcome.error.as_deref(), Some("missing"));
    }
}
