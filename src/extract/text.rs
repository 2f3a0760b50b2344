//! Plain-text strategy with an ordered encoding ladder.
//!
//! Attempts UTF-8, then UTF-16 (BOM-detected), then Latin-1, accepting the
//! first decode that succeeds. Latin-1 maps every byte, so the ladder is
//! total. Units are lines.

use std::path::Path;

use crate::models::DocumentUnit;

use super::{StrategyError, StrategyOutput};

pub(crate) fn extract(path: &Path) -> Result<StrategyOutput, StrategyError> {
    let bytes = std::fs::read(path)?;
    let (content, encoding) = decode(&bytes);

    let units: Vec<DocumentUnit> = content
        .lines()
        .enumerate()
        .map(|(i, line)| DocumentUnit::new(i as u32 + 1, line.to_string()))
        .collect();

    let mut metadata = serde_json::Map::new();
    metadata.insert(
        "encoding".to_string(),
        serde_json::Value::String(encoding.to_string()),
    );
    metadata.insert("line_count".to_string(), serde_json::Value::from(units.len()));

    Ok(StrategyOutput {
        text: content,
        units,
        metadata,
    })
}

/// Decode bytes with the fixed encoding ladder, returning the text and the
/// name of the winning encoding.
fn decode(bytes: &[u8]) -> (String, &'static str) {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return (s.to_string(), "utf-8");
    }

    if let Some(s) = decode_utf16(bytes) {
        return (s, "utf-16");
    }

    // Latin-1 is a total byte-to-char map and cannot fail.
    (bytes.iter().map(|&b| b as char).collect(), "latin-1")
}

/// Decode UTF-16 when a byte-order mark identifies the endianness.
fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (payload, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        _ => return None,
    };

    if payload.len() % 2 != 0 {
        return None;
    }

    let code_units = payload.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });

    char::decode_utf16(code_units)
        .collect::<Result<String, _>>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let (text, encoding) = decode("héllo wörld".as_bytes());
        assert_eq!(text, "héllo wörld");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_decode_utf16_le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "visa".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode(&bytes);
        assert_eq!(text, "visa");
        assert_eq!(encoding, "utf-16");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 and invalid as standalone UTF-8.
        let (text, encoding) = decode(&[b'c', b'a', b'f', 0xE9]);
        assert_eq!(text, "café");
        assert_eq!(encoding, "latin-1");
    }

    #[test]
    fn test_units_are_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        std::fs::write(&path, "one\ntwo\nthree").unwrap();

        let output = extract(&path).unwrap();
        assert_eq!(output.units.len(), 3);
        assert_eq!(output.units[1].text, "two");
        assert_eq!(output.units[1].index, 2);
        assert_eq!(output.metadata["encoding"], "utf-8");
        assert_eq!(output.metadata["line_count"], 3);
    }
}
