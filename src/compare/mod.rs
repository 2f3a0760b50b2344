//! Pairwise document comparison.
//!
//! Four independent similarity signals plus structured differences and
//! commonalities, rolled up into a human-readable summary. All score
//! fields are symmetric under argument order.

pub mod similarity;

use std::collections::BTreeSet;

use crate::analysis::stats::split_sentences;
use crate::config::Settings;
use crate::models::{
    comparison_id, AnalysisResult, CommonElements, ComparisonResult, Differences,
    DocumentIdentity, DocumentRecord, SimilarityScores,
};

/// Qualitative bucket for an overall similarity score.
pub fn similarity_label(overall: f64) -> &'static str {
    if overall > 0.8 {
        "very similar"
    } else if overall > 0.6 {
        "moderately similar"
    } else if overall > 0.4 {
        "somewhat similar"
    } else if overall > 0.2 {
        "quite different"
    } else {
        "very different"
    }
}

/// Compares two analyzed documents.
pub struct DocumentComparator {
    settings: Settings,
}

impl DocumentComparator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Compare two documents given their records and analyses.
    pub fn compare(
        &self,
        record_a: &DocumentRecord,
        analysis_a: &AnalysisResult,
        record_b: &DocumentRecord,
        analysis_b: &AnalysisResult,
    ) -> ComparisonResult {
        let text_a = record_a.text_content.as_str();
        let text_b = record_b.text_content.as_str();

        let scores = SimilarityScores {
            character: similarity::lcs_ratio(text_a, text_b),
            word: similarity::jaccard_words(text_a, text_b),
            semantic: similarity::semantic(&analysis_a.embedding, &analysis_b.embedding),
            structural: similarity::structural(&analysis_a.stats, &analysis_b.stats),
        };

        let differences = self.differences(text_a, text_b);
        let common = self.common_elements(text_a, text_b);

        let document_a = DocumentIdentity {
            file_name: record_a.file_name.clone(),
            fingerprint: record_a.fingerprint.clone(),
        };
        let document_b = DocumentIdentity {
            file_name: record_b.file_name.clone(),
            fingerprint: record_b.fingerprint.clone(),
        };

        let summary = self.summary(&document_a, &document_b, &scores, &differences, &common);

        ComparisonResult {
            comparison_id: comparison_id(&record_a.fingerprint, &record_b.fingerprint),
            document_a,
            document_b,
            scores,
            differences,
            common,
            summary,
        }
    }

    /// Sentence-level set differences plus raw count deltas.
    fn differences(&self, text_a: &str, text_b: &str) -> Differences {
        let sentences_a = split_sentences(text_a);
        let sentences_b = split_sentences(text_b);

        let unique_to_a: Vec<String> = sentences_a
            .iter()
            .filter(|s| !sentences_b.contains(s))
            .take(self.settings.unique_sentence_cap)
            .map(|s| s.to_string())
            .collect();
        let unique_to_b: Vec<String> = sentences_b
            .iter()
            .filter(|s| !sentences_a.contains(s))
            .take(self.settings.unique_sentence_cap)
            .map(|s| s.to_string())
            .collect();

        Differences {
            unique_to_a,
            unique_to_b,
            sentence_count_delta: sentences_a.len() as i64 - sentences_b.len() as i64,
            char_count_delta: text_a.chars().count() as i64 - text_b.chars().count() as i64,
        }
    }

    /// Shared words and sentences, sorted for deterministic output.
    fn common_elements(&self, text_a: &str, text_b: &str) -> CommonElements {
        let words_a: BTreeSet<String> = text_a
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect();
        let words_b: BTreeSet<String> = text_b
            .to_lowercase()
            .split_whitespace()
            .map(String::from)
            .collect();

        let shared: Vec<&String> = words_a.intersection(&words_b).collect();
        let shared_word_count = shared.len();
        let shared_words: Vec<String> = shared
            .into_iter()
            .take(self.settings.shared_word_cap)
            .cloned()
            .collect();

        let lower_a = text_a.to_lowercase();
        let lower_b = text_b.to_lowercase();
        let sentences_a: BTreeSet<&str> = split_sentences(&lower_a).into_iter().collect();
        let sentences_b: BTreeSet<&str> = split_sentences(&lower_b).into_iter().collect();
        let shared_sentences: Vec<String> = sentences_a
            .intersection(&sentences_b)
            .take(self.settings.shared_sentence_cap)
            .map(|s| s.to_string())
            .collect();

        CommonElements {
            shared_words,
            shared_word_count,
            shared_sentences,
            unique_words_a: words_a.len(),
            unique_words_b: words_b.len(),
        }
    }

    fn summary(
        &self,
        a: &DocumentIdentity,
        b: &DocumentIdentity,
        scores: &SimilarityScores,
        differences: &Differences,
        common: &CommonElements,
    ) -> String {
        let overall = scores.overall();

        format!(
            "Document Comparison Summary:\n\
             {} vs {}\n\
             \n\
             Overall Similarity: {:.2}% ({})\n\
             \n\
             Detailed Scores:\n\
             - Character Similarity: {:.2}%\n\
             - Word Similarity: {:.2}%\n\
             - Semantic Similarity: {:.2}%\n\
             - Structural Similarity: {:.2}%\n\
             \n\
             Key Differences:\n\
             - Unique content in {}: {} sentences\n\
             - Unique content in {}: {} sentences\n\
             \n\
             Common Elements:\n\
             - Shared words: {} words\n\
             - Shared sentences: {} sentences",
            a.file_name,
            b.file_name,
            overall * 100.0,
            similarity_label(overall),
            scores.character * 100.0,
            scores.word * 100.0,
            scores.semantic * 100.0,
            scores.structural * 100.0,
            a.file_name,
            differences.unique_to_a.len(),
            b.file_name,
            differences.unique_to_b.len(),
            common.shared_word_count,
            common.shared_sentences.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;

    use crate::analysis::DocumentAnalyzer;
    use crate::capabilities::CapabilitySet;
    use crate::models::{DocumentType, ExtractionMethod};

    fn record(name: &str, text: &str) -> DocumentRecord {
        DocumentRecord {
            path: format!("/tmp/{name}").into(),
            file_name: name.to_string(),
            file_size: text.len() as u64,
            file_type: DocumentType::PlainText,
            extracted_at: Utc::now(),
            text_content: text.to_string(),
            units: Vec::new(),
            metadata: serde_json::json!({}),
            method: ExtractionMethod::DirectRead,
            fingerprint: DocumentRecord::fingerprint_of(text),
            error: None,
        }
    }

    fn compare(text_a: &str, text_b: &str) -> ComparisonResult {
        let analyzer = DocumentAnalyzer::new(Arc::new(CapabilitySet::default()), Settings::default());
        let a = record("a.txt", text_a);
        let b = record("b.txt", text_b);
        let res_a = analyzer.analyze(&a);
        let res_b = analyzer.analyze(&b);
        DocumentComparator::new(Settings::default()).compare(&a, &res_a, &b, &res_b)
    }

    #[test]
    fn test_identical_text_scores() {
        let text = "The permit was issued. The fee was paid on time.";
        let result = compare(text, text);
        assert_eq!(result.scores.character, 1.0);
        assert_eq!(result.scores.word, 1.0);
        assert!(result.scores.semantic > 0.99);
        assert_eq!(result.scores.structural, 1.0);
        assert!(result.summary.contains("very similar"));
        assert!(result.differences.unique_to_a.is_empty());
        assert_eq!(result.differences.sentence_count_delta, 0);
    }

    #[test]
    fn test_scores_bounded_and_symmetric() {
        let text_a = "The first document covers visa policy. It lists required forms.";
        let text_b = "A wholly different text about gardening. Tomatoes need sunlight.";

        let forward = compare(text_a, text_b);
        let reverse = compare(text_b, text_a);

        for scores in [&forward.scores, &reverse.scores] {
            for value in [scores.character, scores.word, scores.semantic, scores.structural] {
                assert!((0.0..=1.0).contains(&value), "score out of range: {value}");
            }
        }

        assert!((forward.scores.character - reverse.scores.character).abs() < 1e-12);
        assert!((forward.scores.word - reverse.scores.word).abs() < 1e-12);
        assert!((forward.scores.semantic - reverse.scores.semantic).abs() < 1e-9);
        assert!((forward.scores.structural - reverse.scores.structural).abs() < 1e-12);
        assert_eq!(forward.comparison_id, reverse.comparison_id);
    }

    #[test]
    fn test_differences_are_directional() {
        let result = compare(
            "Shared sentence. Only in the first.",
            "Shared sentence. Only in the second. And one more.",
        );
        assert_eq!(result.differences.unique_to_a, vec!["Only in the first"]);
        assert_eq!(
            result.differences.unique_to_b,
            vec!["Only in the second", "And one more"]
        );
        assert_eq!(result.differences.sentence_count_delta, -1);
        assert_eq!(result.common.shared_sentences, vec!["shared sentence"]);
    }

    #[test]
    fn test_shared_words_sorted_and_capped() {
        let result = compare("delta alpha beta gamma", "alpha gamma delta omega");
        assert_eq!(result.common.shared_words, vec!["alpha", "delta", "gamma"]);
        assert_eq!(result.common.shared_word_count, 3);
        assert_eq!(result.common.unique_words_a, 4);
        assert_eq!(result.common.unique_words_b, 4);
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(similarity_label(0.9), "very similar");
        assert_eq!(similarity_label(0.7), "moderately similar");
        assert_eq!(similarity_label(0.5), "somewhat similar");
        assert_eq!(similarity_label(0.3), "quite different");
        assert_eq!(similarity_label(0.1), "very different");
    }
}
