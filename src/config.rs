//! Configuration for the analysis pipeline.
//!
//! All tuning values live here as named settings rather than embedded
//! literals. Every field has a default, so a config file is optional; when
//! given, it is a TOML file deserialized over the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Minimum keyword density for a category to win classification.
pub const DEFAULT_CLASSIFY_MIN_DENSITY: f64 = 0.001;

/// Whitespace-token limit applied to text before embedding.
pub const DEFAULT_EMBED_TOKEN_LIMIT: usize = 512;

/// Pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// A category must exceed this keyword density to be assigned.
    pub classify_min_density: f64,
    /// Text is truncated to this many whitespace tokens before embedding.
    pub embed_token_limit: usize,
    /// Maximum shared words reported per comparison.
    pub shared_word_cap: usize,
    /// Maximum shared sentences reported per comparison.
    pub shared_sentence_cap: usize,
    /// Maximum unique sentences reported per side of a comparison.
    pub unique_sentence_cap: usize,
    /// Maximum key phrases from the NLP capability.
    pub keyphrase_cap: usize,
    /// Maximum key phrases from the regex fallback.
    pub keyphrase_fallback_cap: usize,
    /// Readability score above which a document counts as easily readable.
    pub good_readability_threshold: f64,
    /// Readability score below which a document counts as poorly readable.
    pub poor_readability_threshold: f64,
    /// Extraction cache capacity in records. Zero disables caching.
    pub cache_capacity: usize,
    /// Worker count for batch extraction/analysis and comparison phases.
    pub workers: usize,
    /// Language passed to the OCR engine.
    pub ocr_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            classify_min_density: DEFAULT_CLASSIFY_MIN_DENSITY,
            embed_token_limit: DEFAULT_EMBED_TOKEN_LIMIT,
            shared_word_cap: 50,
            shared_sentence_cap: 10,
            unique_sentence_cap: 10,
            keyphrase_cap: 20,
            keyphrase_fallback_cap: 10,
            good_readability_threshold: 60.0,
            poor_readability_threshold: 30.0,
            cache_capacity: 256,
            workers: 4,
            ocr_language: "eng".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, filling unset fields with defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&raw)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.classify_min_density, DEFAULT_CLASSIFY_MIN_DENSITY);
        assert_eq!(settings.embed_token_limit, 512);
        assert_eq!(settings.shared_word_cap, 50);
        assert_eq!(settings.workers, 4);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("workers = 8\nocr_language = \"deu\"").unwrap();
        assert_eq!(settings.workers, 8);
        assert_eq!(settings.ocr_language, "deu");
        assert_eq!(settings.cache_capacity, 256);
    }
}
