//! Per-document analysis results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classified document category.
///
/// Categories are checked in declaration order during classification; ties
/// resolve to the earlier category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Contract,
    Legal,
    Financial,
    Report,
    VisaImmigration,
    General,
}

impl DocumentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Legal => "legal",
            Self::Financial => "financial",
            Self::Report => "report",
            Self::VisaImmigration => "visa_immigration",
            Self::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "contract" => Some(Self::Contract),
            "legal" => Some(Self::Legal),
            "financial" => Some(Self::Financial),
            "report" => Some(Self::Report),
            "visa_immigration" => Some(Self::VisaImmigration),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Basic text statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextStats {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_words_per_sentence: f64,
    pub avg_chars_per_word: f64,
    /// Simplified Flesch Reading Ease, clamped to [0, 100].
    pub readability: f64,
}

/// A named entity located in the document text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Text span of the entity.
    pub text: String,
    /// Entity label (e.g. "PERSON", "ORG").
    pub label: String,
    /// Start offset in chars.
    pub start: usize,
    /// End offset in chars.
    pub end: usize,
    /// Recognizer confidence in [0, 1].
    pub confidence: f32,
}

/// Sentiment polarity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Lexicon-based sentiment summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Winning-side share of all indicator hits, in [0, 1]. 0.5 when
    /// neutral.
    pub confidence: f64,
    pub positive_indicators: usize,
    pub negative_indicators: usize,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.5,
            positive_indicators: 0,
            negative_indicators: 0,
        }
    }
}

/// The analyzer's output for one document record.
///
/// Never mutated after creation. A degraded result (empty or
/// whitespace-only source text) carries defined defaults in every field and
/// `degraded: true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Fingerprint of the analyzed document record.
    pub fingerprint: String,
    /// Display name of the analyzed document.
    pub file_name: String,
    /// When analysis ran.
    pub analyzed_at: DateTime<Utc>,
    pub stats: TextStats,
    pub category: DocumentCategory,
    pub entities: Vec<Entity>,
    pub key_phrases: Vec<String>,
    pub sentiment: Sentiment,
    /// Embedding vector; empty when the capability is absent or failed.
    pub embedding: Vec<f32>,
    /// True when the source text was empty or whitespace-only.
    pub degraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for c in [
            DocumentCategory::Contract,
            DocumentCategory::Legal,
            DocumentCategory::Financial,
            DocumentCategory::Report,
            DocumentCategory::VisaImmigration,
            DocumentCategory::General,
        ] {
            assert_eq!(DocumentCategory::from_str(c.as_str()), Some(c));
        }
    }

    #[test]
    fn test_default_sentiment_is_neutral() {
        let s = Sentiment::default();
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.confidence, 0.5);
    }
}
