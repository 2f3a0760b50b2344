//! Image strategy: OCR via the injected capability.
//!
//! The engine's per-word confidence aggregate is surfaced as record
//! metadata. A single unit holds the full recognized text.

use std::path::Path;

use crate::capabilities::OcrCapability;
use crate::models::DocumentUnit;

use super::{StrategyError, StrategyOutput};

pub(crate) fn extract(
    path: &Path,
    ocr: Option<&dyn OcrCapability>,
) -> Result<StrategyOutput, StrategyError> {
    let ocr = ocr.ok_or(StrategyError::NoCapability)?;

    let output = ocr.recognize(path)?;

    let mut metadata = serde_json::Map::new();
    metadata.insert(
        "ocr_engine".to_string(),
        serde_json::Value::String(ocr.name().to_string()),
    );
    if let Some(confidence) = output.avg_confidence {
        metadata.insert(
            "avg_confidence".to_string(),
            serde_json::Value::from(confidence),
        );
    }

    let units = if output.text.trim().is_empty() {
        Vec::new()
    } else {
        vec![DocumentUnit::new(1, output.text.clone())]
    };

    Ok(StrategyOutput {
        text: output.text,
        units,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{OcrError, OcrOutput};

    struct FixedOcr(&'static str);

    impl OcrCapability for FixedOcr {
        fn name(&self) -> &str {
            "fixed"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn availability_hint(&self) -> String {
            String::new()
        }

        fn recognize(&self, _image_path: &Path) -> Result<OcrOutput, OcrError> {
            Ok(OcrOutput {
                text: self.0.to_string(),
                avg_confidence: Some(91.5),
            })
        }
    }

    #[test]
    fn test_no_capability_is_error() {
        let result = extract(Path::new("scan.png"), None);
        assert!(matches!(result, Err(StrategyError::NoCapability)));
    }

    #[test]
    fn test_confidence_surfaces_as_metadata() {
        let ocr = FixedOcr("RESIDENCE PERMIT");
        let output = extract(Path::new("scan.png"), Some(&ocr)).unwrap();
        assert_eq!(output.text, "RESIDENCE PERMIT");
        assert_eq!(output.units.len(), 1);
        assert_eq!(output.metadata["ocr_engine"], "fixed");
        assert!((output.metadata["avg_confidence"].as_f64().unwrap() - 91.5).abs() < 1e-6);
    }
}
