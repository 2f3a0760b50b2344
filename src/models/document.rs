//! Canonical document records produced by extraction.
//!
//! Every supported format is reduced to the same shape: full text content,
//! an ordered list of sub-units natural to the format, format-specific
//! metadata, and a fingerprint of the extracted text. The fingerprint is
//! content-addressable: identical text always yields the identical
//! fingerprint, independent of the source file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Supported document types, detected from extension or file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    PlainText,
    Word,
    Pdf,
    Image,
    Other,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Word => "word",
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "plain_text" => Some(Self::PlainText),
            "word" => Some(Self::Word),
            "pdf" => Some(Self::Pdf),
            "image" => Some(Self::Image),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Map a lowercased file extension to a document type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" | "md" | "text" | "log" => Some(Self::PlainText),
            "docx" | "doc" => Some(Self::Word),
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "gif" => Some(Self::Image),
            _ => None,
        }
    }

    /// Detect the type of a file: extension first, then content sniffing.
    ///
    /// Falls back to [`DocumentType::Other`] when neither identifies the
    /// file, which routes extraction to the generic fallback capability.
    pub fn detect(path: &Path) -> Self {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if let Some(t) = Self::from_extension(&ext.to_lowercase()) {
                return t;
            }
        }
        Self::sniff(path).unwrap_or(Self::Other)
    }

    /// Sniff the type from the first bytes of the file content.
    fn sniff(path: &Path) -> Option<Self> {
        use std::io::Read;

        let mut file = std::fs::File::open(path).ok()?;
        let mut buffer = [0u8; 8192];
        let bytes_read = file.read(&mut buffer).ok()?;
        if bytes_read == 0 {
            return None;
        }

        let detected = infer::get(&buffer[..bytes_read])?;
        match detected.mime_type() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/msword" => Some(Self::Word),
            m if m.starts_with("image/") => Some(Self::Image),
            m if m.starts_with("text/") => Some(Self::PlainText),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategy that produced the text content of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Direct decode of a plain-text file.
    DirectRead,
    /// OOXML word-processor document body.
    WordXml,
    /// Portable-document text layer.
    PdfText,
    /// OCR over an image via the OCR capability.
    Ocr,
    /// Generic best-effort fallback capability.
    Fallback,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectRead => "direct_read",
            Self::WordXml => "word_xml",
            Self::PdfText => "pdf_text",
            Self::Ocr => "ocr",
            Self::Fallback => "fallback",
        }
    }
}

/// One ordered sub-unit of a document: a page, paragraph, or line
/// depending on the source format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUnit {
    /// Position within the document, starting at 1.
    pub index: u32,
    /// Text of the unit.
    pub text: String,
    /// Character count of the unit text.
    pub char_count: usize,
}

impl DocumentUnit {
    pub fn new(index: u32, text: String) -> Self {
        let char_count = text.chars().count();
        Self {
            index,
            text,
            char_count,
        }
    }
}

/// The extractor's canonical output for one document.
///
/// Immutable once produced. Strategy failures are recorded in `error`
/// instead of aborting extraction; such records carry empty text and are
/// never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Source path the document was read from.
    pub path: PathBuf,
    /// Display name (file name component of the path).
    pub file_name: String,
    /// Size of the source file in bytes.
    pub file_size: u64,
    /// Detected document type.
    pub file_type: DocumentType,
    /// When extraction ran.
    pub extracted_at: DateTime<Utc>,
    /// Full normalized text content.
    pub text_content: String,
    /// Ordered sub-units: pages, paragraphs, or lines depending on type.
    pub units: Vec<DocumentUnit>,
    /// Format-specific metadata mapping.
    pub metadata: serde_json::Value,
    /// Strategy that produced the text.
    pub method: ExtractionMethod,
    /// SHA-256 hex of `text_content`; cache and dedup key.
    pub fingerprint: String,
    /// Strategy failure message, if extraction degraded.
    pub error: Option<String>,
}

impl DocumentRecord {
    /// Compute the content fingerprint for extracted text.
    ///
    /// A pure function of the text alone: hashing the same text from any
    /// source yields the same fingerprint.
    pub fn fingerprint_of(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Whether extraction degraded (strategy failure, empty text).
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_pure() {
        let a = DocumentRecord::fingerprint_of("Hello, World!");
        let b = DocumentRecord::fingerprint_of("Hello, World!");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // SHA-256 produces 64 hex chars
    }

    #[test]
    fn test_fingerprint_differs_by_content() {
        let a = DocumentRecord::fingerprint_of("one");
        let b = DocumentRecord::fingerprint_of("two");
        assert_ne!(a, b);
    }

    #[test]
    fn test_type_from_extension() {
        assert_eq!(
            DocumentType::from_extension("txt"),
            Some(DocumentType::PlainText)
        );
        assert_eq!(DocumentType::from_extension("docx"), Some(DocumentType::Word));
        assert_eq!(DocumentType::from_extension("pdf"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("png"), Some(DocumentType::Image));
        assert_eq!(DocumentType::from_extension("xyz"), None);
    }

    #[test]
    fn test_type_roundtrip() {
        for t in [
            DocumentType::PlainText,
            DocumentType::Word,
            DocumentType::Pdf,
            DocumentType::Image,
            DocumentType::Other,
        ] {
            assert_eq!(DocumentType::from_str(t.as_str()), Some(t));
        }
    }
}
