//! Capability ports consumed by the pipeline.
//!
//! OCR, NLP, embedding, and generic text extraction are injectable and
//! swappable engines behind stable traits. Each is independently optional:
//! an absent capability degrades to a documented fallback instead of
//! failing the pipeline.

mod embedding;
mod fallback;
mod nlp;
mod ocr;

pub use embedding::{
    cosine_similarity, EmbeddingCapability, EmbeddingError, HashEmbedder, EMBEDDING_DIM,
};
pub use fallback::{FallbackExtraction, LossyTextExtractor};
pub use nlp::{NlpCapability, NlpError};
pub use ocr::{OcrCapability, OcrError, OcrOutput, TesseractOcr};

use serde::Serialize;

/// Availability report for one capability slot.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityStatus {
    /// Slot name: "ocr", "nlp", "embedding", or "fallback".
    pub slot: &'static str,
    /// Name of the registered engine, if any.
    pub engine: Option<String>,
    /// Whether the engine can actually run.
    pub available: bool,
    /// What is needed to make the engine available.
    pub hint: Option<String>,
}

/// The set of capabilities injected into the extractor and analyzer.
///
/// Defaults: Tesseract OCR (subprocess), no NLP engine (regex fallback in
/// the analyzer), the deterministic hash embedder, and lossy-text generic
/// extraction.
pub struct CapabilitySet {
    ocr: Option<Box<dyn OcrCapability>>,
    nlp: Option<Box<dyn NlpCapability>>,
    embedding: Option<Box<dyn EmbeddingCapability>>,
    fallback: Option<Box<dyn FallbackExtraction>>,
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self {
            ocr: Some(Box::new(TesseractOcr::new())),
            nlp: None,
            embedding: Some(Box::new(HashEmbedder::new())),
            fallback: Some(Box::new(LossyTextExtractor)),
        }
    }
}

impl CapabilitySet {
    /// An empty set with no capabilities registered.
    pub fn empty() -> Self {
        Self {
            ocr: None,
            nlp: None,
            embedding: None,
            fallback: None,
        }
    }

    pub fn with_ocr(mut self, ocr: Box<dyn OcrCapability>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn with_nlp(mut self, nlp: Box<dyn NlpCapability>) -> Self {
        self.nlp = Some(nlp);
        self
    }

    pub fn with_embedding(mut self, embedding: Box<dyn EmbeddingCapability>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FallbackExtraction>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn without_embedding(mut self) -> Self {
        self.embedding = None;
        self
    }

    pub fn ocr(&self) -> Option<&dyn OcrCapability> {
        self.ocr.as_deref()
    }

    pub fn nlp(&self) -> Option<&dyn NlpCapability> {
        self.nlp.as_deref()
    }

    pub fn embedding(&self) -> Option<&dyn EmbeddingCapability> {
        self.embedding.as_deref()
    }

    pub fn fallback(&self) -> Option<&dyn FallbackExtraction> {
        self.fallback.as_deref()
    }

    /// Report the registration and availability of every slot.
    pub fn status(&self) -> Vec<CapabilityStatus> {
        vec![
            CapabilityStatus {
                slot: "ocr",
                engine: self.ocr.as_ref().map(|c| c.name().to_string()),
                available: self.ocr.as_ref().is_some_and(|c| c.is_available()),
                hint: self.ocr.as_ref().map(|c| c.availability_hint()),
            },
            CapabilityStatus {
                slot: "nlp",
                engine: self.nlp.as_ref().map(|c| c.name().to_string()),
                available: self.nlp.as_ref().is_some_and(|c| c.is_available()),
                hint: None,
            },
            CapabilityStatus {
                slot: "embedding",
                engine: self.embedding.as_ref().map(|c| c.name().to_string()),
                available: self.embedding.is_some(),
                hint: None,
            },
            CapabilityStatus {
                slot: "fallback",
                engine: self.fallback.as_ref().map(|c| c.name().to_string()),
                available: self.fallback.is_some(),
                hint: None,
            },
        ]
    }
}
