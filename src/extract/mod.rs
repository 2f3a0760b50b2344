//! Text extraction: format dispatch, strategies, and the fingerprint cache.
//!
//! [`DocumentExtractor::extract`] detects the document type, runs the
//! matching strategy, and produces a canonical [`DocumentRecord`]. Strategy
//! failures never abort extraction: the record comes back with an error
//! marker and empty text. Only a missing or unreadable path is a hard
//! error.

mod cache;
mod image;
mod pdf;
mod text;
mod word;

pub use cache::FingerprintCache;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::capabilities::{CapabilitySet, OcrError};
use crate::config::Settings;
use crate::models::{DocumentRecord, DocumentType, DocumentUnit, ExtractionMethod};

/// Hard extraction errors. Strategy-level failures are recorded on the
/// returned record instead.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure inside a single strategy; converted to the record's error
/// marker, never raised past the extractor boundary.
#[derive(Debug, Error)]
pub(crate) enum StrategyError {
    #[error("{0}")]
    Parse(String),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("no capability registered for this document type")]
    NoCapability,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a strategy produces on success.
pub(crate) struct StrategyOutput {
    pub text: String,
    pub units: Vec<DocumentUnit>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Dispatches extraction by document type and caches records by
/// fingerprint.
pub struct DocumentExtractor {
    capabilities: Arc<CapabilitySet>,
    cache: FingerprintCache,
}

impl DocumentExtractor {
    pub fn new(capabilities: Arc<CapabilitySet>, settings: &Settings) -> Self {
        Self {
            capabilities,
            cache: FingerprintCache::new(settings.cache_capacity),
        }
    }

    /// Extract a canonical record from a document on disk.
    ///
    /// Repeated extraction of content-identical documents is a cache hit
    /// and returns the first record produced for that content.
    pub fn extract(&self, path: &Path) -> Result<Arc<DocumentRecord>, ExtractionError> {
        let meta = std::fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExtractionError::NotFound(path.to_path_buf())
            } else {
                ExtractionError::Io(e)
            }
        })?;

        let file_type = DocumentType::detect(path);
        let method = method_for(file_type);

        let (output, error) = match self.run_strategy(path, file_type) {
            Ok(output) => (output, None),
            Err(e) => {
                tracing::warn!("extraction failed for {}: {}", path.display(), e);
                (
                    StrategyOutput {
                        text: String::new(),
                        units: Vec::new(),
                        metadata: serde_json::Map::new(),
                    },
                    Some(e.to_string()),
                )
            }
        };

        let fingerprint = DocumentRecord::fingerprint_of(&output.text);
        let record = DocumentRecord {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            file_size: meta.len(),
            file_type,
            extracted_at: Utc::now(),
            text_content: output.text,
            units: output.units,
            metadata: serde_json::Value::Object(output.metadata),
            method,
            fingerprint,
            error,
        };

        if record.is_degraded() {
            // Error records are returned but never published to the cache.
            return Ok(Arc::new(record));
        }

        tracing::info!(
            "extracted {} ({} chars, {})",
            record.file_name,
            record.text_content.chars().count(),
            record.method.as_str()
        );

        Ok(self.cache.insert_if_absent(Arc::new(record)))
    }

    /// Number of records currently cached.
    pub fn cached_records(&self) -> usize {
        self.cache.len()
    }

    fn run_strategy(
        &self,
        path: &Path,
        file_type: DocumentType,
    ) -> Result<StrategyOutput, StrategyError> {
        match file_type {
            DocumentType::PlainText => text::extract(path),
            DocumentType::Word => word::extract(path),
            DocumentType::Pdf => pdf::extract(path),
            DocumentType::Image => image::extract(path, self.capabilities.ocr()),
            DocumentType::Other => self.extract_fallback(path),
        }
    }

    fn extract_fallback(&self, path: &Path) -> Result<StrategyOutput, StrategyError> {
        let fallback = self
            .capabilities
            .fallback()
            .ok_or(StrategyError::NoCapability)?;
        let text = fallback.extract_text(path)?;

        let mut metadata = serde_json::Map::new();
        metadata.insert(
            "fallback_engine".to_string(),
            serde_json::Value::String(fallback.name().to_string()),
        );

        let units = vec![DocumentUnit::new(1, text.clone())];
        Ok(StrategyOutput {
            text,
            units,
            metadata,
        })
    }
}

/// The extraction method each document type reports, including on failure.
fn method_for(file_type: DocumentType) -> ExtractionMethod {
    match file_type {
        DocumentType::PlainText => ExtractionMethod::DirectRead,
        DocumentType::Word => ExtractionMethod::WordXml,
        DocumentType::Pdf => ExtractionMethod::PdfText,
        DocumentType::Image => ExtractionMethod::Ocr,
        DocumentType::Other => ExtractionMethod::Fallback,
    }
}
