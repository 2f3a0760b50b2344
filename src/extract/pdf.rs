//! Portable-document strategy.
//!
//! Text comes from the `pdf-extract` text layer; page count and
//! Info-dictionary metadata from `lopdf`. Units are form-feed-separated
//! pages when the text layer delimits them, otherwise a single unit.

use std::path::Path;

use crate::models::DocumentUnit;

use super::{StrategyError, StrategyOutput};

pub(crate) fn extract(path: &Path) -> Result<StrategyOutput, StrategyError> {
    let bytes = std::fs::read(path)?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| StrategyError::Parse(format!("PDF extraction failed: {}", e)))?;

    let mut metadata = serde_json::Map::new();
    if let Ok(doc) = lopdf::Document::load_mem(&bytes) {
        metadata.insert(
            "page_count".to_string(),
            serde_json::Value::from(doc.get_pages().len()),
        );
        for (key, value) in info_metadata(&doc) {
            metadata.insert(key, serde_json::Value::String(value));
        }
    }

    let units = page_units(&text);

    Ok(StrategyOutput {
        text,
        units,
        metadata,
    })
}

/// Split the text layer into page units on form feeds; fall back to a
/// single unit when no page delimiters are present.
fn page_units(text: &str) -> Vec<DocumentUnit> {
    if text.contains('\u{c}') {
        text.split('\u{c}')
            .map(str::trim)
            .filter(|page| !page.is_empty())
            .enumerate()
            .map(|(i, page)| DocumentUnit::new(i as u32 + 1, page.to_string()))
            .collect()
    } else if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![DocumentUnit::new(1, text.trim().to_string())]
    }
}

/// Best-effort read of the trailer Info dictionary.
fn info_metadata(doc: &lopdf::Document) -> Vec<(String, String)> {
    let mut out = Vec::new();

    let Some(info) = resolve_info_dict(doc) else {
        return out;
    };

    for (key, label) in [
        (b"Title".as_slice(), "title"),
        (b"Author".as_slice(), "author"),
        (b"Subject".as_slice(), "subject"),
        (b"Creator".as_slice(), "creator"),
        (b"CreationDate".as_slice(), "creation_date"),
    ] {
        if let Some(value) = info
            .get(key)
            .ok()
            .and_then(|obj| obj.as_str().ok())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        {
            if !value.is_empty() {
                out.push((label.to_string(), value));
            }
        }
    }

    out
}

fn resolve_info_dict(doc: &lopdf::Document) -> Option<&lopdf::Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    match info.as_reference() {
        Ok(id) => doc.get_object(id).ok()?.as_dict().ok(),
        Err(_) => info.as_dict().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        assert!(extract(&path).is_err());
    }

    #[test]
    fn test_page_units_split_on_form_feed() {
        let units = page_units("page one text\u{c}page two text");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].text, "page one text");
        assert_eq!(units[1].index, 2);
    }

    #[test]
    fn test_page_units_single_without_delimiters() {
        let units = page_units("just one run of text");
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_page_units_empty_text() {
        assert!(page_units("   ").is_empty());
    }
}
