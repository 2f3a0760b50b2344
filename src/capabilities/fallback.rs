//! Generic best-effort text extraction port.
//!
//! Used for any document type with no dedicated strategy. The default
//! engine salvages whatever printable UTF-8 the file contains.

use std::path::Path;

/// Trait for generic text-extraction engines.
pub trait FallbackExtraction: Send + Sync {
    /// Engine identifier.
    fn name(&self) -> &str;

    /// Extract best-effort text from an arbitrary file.
    fn extract_text(&self, path: &Path) -> Result<String, std::io::Error>;
}

/// Lossy UTF-8 salvage: decode with replacement and keep printable
/// content plus ordinary whitespace.
pub struct LossyTextExtractor;

impl FallbackExtraction for LossyTextExtractor {
    fn name(&self) -> &str {
        "lossy-text"
    }

    fn extract_text(&self, path: &Path) -> Result<String, std::io::Error> {
        let bytes = std::fs::read(path)?;
        let decoded = String::from_utf8_lossy(&bytes);
        let text: String = decoded
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
            .collect();
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_salvages_printable_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello\x00world\nsecond line\x07").unwrap();

        let extractor = LossyTextExtractor;
        let text = extractor.extract_text(file.path()).unwrap();
        assert_eq!(text, "helloworld\nsecond line");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let extractor = LossyTextExtractor;
        assert!(extractor
            .extract_text(Path::new("/nonexistent/file.bin"))
            .is_err());
    }
}
