//! OCR capability port.
//!
//! The default engine shells out to Tesseract, the widely-available
//! command-line OCR option. Any engine can be swapped in behind
//! [`OcrCapability`].

use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    Unavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of recognizing one image.
#[derive(Debug, Clone)]
pub struct OcrOutput {
    /// Recognized text.
    pub text: String,
    /// Mean per-word confidence in [0, 100], if the engine reports one.
    pub avg_confidence: Option<f32>,
}

/// Trait for OCR engines.
pub trait OcrCapability: Send + Sync {
    /// Engine identifier (e.g. "tesseract").
    fn name(&self) -> &str;

    /// Check if this engine can run (binaries installed, models present).
    fn is_available(&self) -> bool;

    /// What is needed to make this engine available.
    fn availability_hint(&self) -> String;

    /// Recognize text in an image file.
    fn recognize(&self, image_path: &Path) -> Result<OcrOutput, OcrError>;
}

/// Tesseract OCR via the command line.
pub struct TesseractOcr {
    language: String,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Run Tesseract over an image, capturing stdout.
    fn run(&self, image_path: &Path, extra: &[&str]) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .args(extra)
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::Failed(format!("tesseract failed: {}", stderr)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::Unavailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(OcrError::Io(e)),
        }
    }

    /// Mean confidence over recognized words from Tesseract's TSV output.
    ///
    /// Rows with a non-positive confidence are layout markers, not words.
    fn confidence(&self, image_path: &Path) -> Option<f32> {
        let tsv = match self.run(image_path, &["tsv"]) {
            Ok(tsv) => tsv,
            Err(e) => {
                tracing::debug!("tesseract tsv pass failed: {}", e);
                return None;
            }
        };

        let confidences: Vec<f32> = tsv
            .lines()
            .skip(1)
            .filter_map(|line| line.split('\t').nth(10))
            .filter_map(|field| field.parse::<f32>().ok())
            .filter(|conf| *conf > 0.0)
            .collect();

        if confidences.is_empty() {
            None
        } else {
            Some(confidences.iter().sum::<f32>() / confidences.len() as f32)
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrCapability for TesseractOcr {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        which::which("tesseract").is_ok()
    }

    fn availability_hint(&self) -> String {
        "install tesseract-ocr and ensure `tesseract` is in PATH".to_string()
    }

    fn recognize(&self, image_path: &Path) -> Result<OcrOutput, OcrError> {
        let text = self.run(image_path, &[])?;
        let avg_confidence = self.confidence(image_path);
        Ok(OcrOutput {
            text,
            avg_confidence,
        })
    }
}
