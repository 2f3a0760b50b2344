//! Per-document analysis: statistics, classification, entities, key
//! phrases, sentiment, and embedding.
//!
//! [`DocumentAnalyzer::analyze`] never fails. Empty or whitespace-only text
//! yields a degraded result with defined defaults in every field.

pub mod classify;
pub mod phrases;
pub mod sentiment;
pub mod stats;

use std::sync::Arc;

use chrono::Utc;

use crate::capabilities::CapabilitySet;
use crate::config::Settings;
use crate::models::{AnalysisResult, DocumentCategory, DocumentRecord, Entity, Sentiment};

/// Computes an [`AnalysisResult`] from a [`DocumentRecord`].
pub struct DocumentAnalyzer {
    capabilities: Arc<CapabilitySet>,
    settings: Settings,
}

impl DocumentAnalyzer {
    pub fn new(capabilities: Arc<CapabilitySet>, settings: Settings) -> Self {
        Self {
            capabilities,
            settings,
        }
    }

    /// Analyze one document record.
    pub fn analyze(&self, record: &DocumentRecord) -> AnalysisResult {
        let text = record.text_content.as_str();

        if text.trim().is_empty() {
            tracing::debug!("no text content to analyze for {}", record.file_name);
            return self.degraded(record);
        }

        let stats = stats::text_stats(text);
        let category = classify::classify(text, self.settings.classify_min_density);
        let (entities, key_phrases) = self.entities_and_phrases(text);
        let sentiment = sentiment::analyze(text);
        let embedding = self.embed(text);

        AnalysisResult {
            fingerprint: record.fingerprint.clone(),
            file_name: record.file_name.clone(),
            analyzed_at: Utc::now(),
            stats,
            category,
            entities,
            key_phrases,
            sentiment,
            embedding,
            degraded: false,
        }
    }

    /// Defined defaults for empty or whitespace-only content.
    fn degraded(&self, record: &DocumentRecord) -> AnalysisResult {
        AnalysisResult {
            fingerprint: record.fingerprint.clone(),
            file_name: record.file_name.clone(),
            analyzed_at: Utc::now(),
            stats: Default::default(),
            category: DocumentCategory::General,
            entities: Vec::new(),
            key_phrases: Vec::new(),
            sentiment: Sentiment::default(),
            embedding: Vec::new(),
            degraded: true,
        }
    }

    /// Entities and key phrases from the NLP capability, or the regex
    /// fallback when the capability is absent or fails.
    fn entities_and_phrases(&self, text: &str) -> (Vec<Entity>, Vec<String>) {
        if let Some(nlp) = self.capabilities.nlp().filter(|n| n.is_available()) {
            let entities = match nlp.entities(text) {
                Ok(entities) => entities,
                Err(e) => {
                    tracing::debug!("entity extraction failed: {}", e);
                    Vec::new()
                }
            };
            let phrases = match nlp.noun_chunks(text) {
                Ok(chunks) => phrases::filter_noun_chunks(chunks, self.settings.keyphrase_cap),
                Err(e) => {
                    tracing::debug!("noun chunking failed: {}", e);
                    phrases::fallback_key_phrases(text, self.settings.keyphrase_fallback_cap)
                }
            };
            return (entities, phrases);
        }

        (
            Vec::new(),
            phrases::fallback_key_phrases(text, self.settings.keyphrase_fallback_cap),
        )
    }

    /// Embed the text, truncated to the configured token limit. Failures
    /// degrade to an empty vector.
    fn embed(&self, text: &str) -> Vec<f32> {
        let Some(embedder) = self.capabilities.embedding() else {
            return Vec::new();
        };

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let truncated;
        let input = if tokens.len() > self.settings.embed_token_limit {
            truncated = tokens[..self.settings.embed_token_limit].join(" ");
            truncated.as_str()
        } else {
            text
        };

        match embedder.embed(input) {
            Ok(vector) => vector,
            Err(e) => {
                tracing::warn!("embedding failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::EMBEDDING_DIM;
    use crate::models::{DocumentType, ExtractionMethod, SentimentLabel};

    fn record(text: &str) -> DocumentRecord {
        DocumentRecord {
            path: "/tmp/doc.txt".into(),
            file_name: "doc.txt".to_string(),
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

    fn analyzer() -> DocumentAnalyzer {
        DocumentAnalyzer::new(Arc::new(CapabilitySet::default()), Settings::default())
    }

    #[test]
    fn test_empty_text_degrades() {
        let result = analyzer().analyze(&record("   \n  "));
        assert!(result.degraded);
        assert_eq!(result.stats.word_count, 0);
        assert_eq!(result.stats.readability, 0.0);
        assert_eq!(result.category, DocumentCategory::General);
        assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
        assert!(result.embedding.is_empty());
    }

    #[test]
    fn test_full_analysis() {
        let result = analyzer().analyze(&record(
            "the visa application was approved. the embassy returned the passport \
             with the residence permit. an excellent outcome for the applicant.",
        ));
        assert!(!result.degraded);
        assert_eq!(result.category, DocumentCategory::VisaImmigration);
        assert_eq!(result.sentiment.label, SentimentLabel::Positive);
        assert_eq!(result.embedding.len(), EMBEDDING_DIM);
        assert!((0.0..=100.0).contains(&result.stats.readability));
        assert!(result.entities.is_empty()); // no NLP capability by default
    }

    #[test]
    fn test_embedding_respects_token_limit() {
        let mut settings = Settings::default();
        settings.embed_token_limit = 3;
        let analyzer = DocumentAnalyzer::new(Arc::new(CapabilitySet::default()), settings);

        let full = analyzer.analyze(&record("alpha beta gamma delta epsilon"));
        let truncated = analyzer.analyze(&record("alpha beta gamma"));
        assert_eq!(full.embedding, truncated.embedding);
    }

    #[test]
    fn test_missing_embedder_yields_empty_vector() {
        let caps = CapabilitySet::default().without_embedding();
        let analyzer = DocumentAnalyzer::new(Arc::new(caps), Settings::default());
        let result = analyzer.analyze(&record("some ordinary text."));
        assert!(result.embedding.is_empty());
        assert!(!result.degraded);
    }
}
