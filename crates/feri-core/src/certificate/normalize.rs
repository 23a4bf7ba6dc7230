//! Text normalization for pattern matching.

use crate::error::ExtractionError;

/// Collapse a raw multi-page text stream into one matchable line.
///
/// All newlines and whitespace runs become single spaces and the ends are
/// trimmed, so label anchors match across the line breaks the renderer
/// introduced. Empty input yields empty output.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Normalize a raw byte stream, rejecting input that is not text.
///
/// This is the pipeline's only hard failure: bytes that do not decode as
/// UTF-8 cannot be normalized and abort extraction for the document.
pub fn normalize_bytes(data: &[u8]) -> Result<String, ExtractionError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| ExtractionError::Structural(e.to_string()))?;
    Ok(normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapses_newlines_and_runs() {
        let raw = "  IMPORTATEUR :\n  ACME   CORP \t;\nEXPORTATEUR  ";
        assert_eq!(normalize(raw), "IMPORTATEUR : ACME CORP ; EXPORTATEUR");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[test]
    fn test_non_text_bytes_are_structural_failures() {
        assert!(normalize_bytes(&[0xff, 0xfe, 0x00]).is_err());
        assert_eq!(normalize_bytes(b"A.D N\xc2\xb0 12345").unwrap(), "A.D N° 12345");
    }
}
