//! Word-processor (OOXML) strategy.
//!
//! Reads `word/document.xml` from the zip container and collects `<w:t>`
//! text runs grouped per `<w:p>` paragraph. Core properties come from
//! `docProps/core.xml`. Units are non-empty paragraphs.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;

use crate::models::DocumentUnit;

use super::{StrategyError, StrategyOutput};

/// Maximum decompressed bytes to read from a single zip entry.
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

pub(crate) fn extract(path: &Path) -> Result<StrategyOutput, StrategyError> {
    let bytes = std::fs::read(path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.as_slice()))
        .map_err(|e| StrategyError::Parse(format!("not an OOXML container: {}", e)))?;

    let document_xml = read_entry(&mut archive, "word/document.xml")?;
    let paragraphs = read_paragraphs(&document_xml)?;

    let mut metadata = serde_json::Map::new();
    if let Ok(core_xml) = read_entry(&mut archive, "docProps/core.xml") {
        for (key, value) in read_core_properties(&core_xml) {
            metadata.insert(key, serde_json::Value::String(value));
        }
    }
    metadata.insert(
        "paragraph_count".to_string(),
        serde_json::Value::from(paragraphs.len()),
    );

    let text = paragraphs.join("\n");
    let units: Vec<DocumentUnit> = paragraphs
        .into_iter()
        .enumerate()
        .map(|(i, p)| DocumentUnit::new(i as u32 + 1, p))
        .collect();

    Ok(StrategyOutput {
        text,
        units,
        metadata,
    })
}

fn read_entry(
    archive: &mut zip::ZipArchive<std::io::Cursor<&[u8]>>,
    name: &str,
) -> Result<Vec<u8>, StrategyError> {
    let entry = archive
        .by_name(name)
        .map_err(|e| StrategyError::Parse(format!("{} not found: {}", name, e)))?;
    let mut out = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut out)
        .map_err(StrategyError::Io)?;
    if out.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(StrategyError::Parse(format!(
            "{} exceeds size limit ({} bytes)",
            name, MAX_XML_ENTRY_BYTES
        )));
    }
    Ok(out)
}

/// Collect `<w:t>` runs grouped by enclosing `<w:p>` paragraph, keeping
/// non-empty paragraphs.
fn read_paragraphs(xml: &[u8]) -> Result<Vec<String>, StrategyError> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                current.push_str(t.unescape().unwrap_or_default().as_ref());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(StrategyError::Parse(format!("document.xml: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Pull title/creator/subject/created/modified from `docProps/core.xml`.
fn read_core_properties(xml: &[u8]) -> Vec<(String, String)> {
    let mut properties = Vec::new();
    let mut current_key: Option<&'static str> = None;

    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current_key = match e.local_name().as_ref() {
                    b"title" => Some("title"),
                    b"creator" => Some("author"),
                    b"subject" => Some("subject"),
                    b"created" => Some("created"),
                    b"modified" => Some("modified"),
                    _ => None,
                };
            }
            Ok(Event::Text(t)) => {
                if let Some(key) = current_key.take() {
                    let value = t.unescape().unwrap_or_default().into_owned();
                    if !value.is_empty() {
                        properties.push((key.to_string(), value));
                    }
                }
            }
            Ok(Event::End(_)) => current_key = None,
            Ok(Event::Eof) => break,
            Err(_) => break, // metadata is best-effort
            _ => {}
        }
        buf.clear();
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build a minimal .docx in memory.
    fn docx_bytes(document_xml: &str, core_xml: Option<&str>) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();

        if let Some(core) = core_xml {
            zip.start_file("docProps/core.xml", options).unwrap();
            zip.write_all(core.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    const DOC_XML: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
    <w:p></w:p>
  </w:body>
</w:document>"#;

    const CORE_XML: &str = r#"<?xml version="1.0"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
    xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:title>Service Agreement</dc:title>
  <dc:creator>Legal Team</dc:creator>
</cp:coreProperties>"#;

    #[test]
    fn test_paragraph_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        std::fs::write(&path, docx_bytes(DOC_XML, Some(CORE_XML))).unwrap();

        let output = extract(&path).unwrap();
        assert_eq!(output.units.len(), 2);
        assert_eq!(output.units[0].text, "First paragraph.");
        assert_eq!(output.units[1].text, "Second paragraph.");
        assert_eq!(output.text, "First paragraph.\nSecond paragraph.");
        assert_eq!(output.metadata["title"], "Service Agreement");
        assert_eq!(output.metadata["author"], "Legal Team");
    }

    #[test]
    fn test_missing_document_xml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");

        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        zip.start_file("unrelated.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"nothing").unwrap();
        std::fs::write(&path, zip.finish().unwrap().into_inner()).unwrap();

        assert!(extract(&path).is_err());
    }
}
