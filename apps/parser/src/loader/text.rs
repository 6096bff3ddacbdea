use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, WINDOWS_1252};

use super::DocumentLoader;
use crate::errors::DocumentLoadError;

/// Share of control characters above which decoded text is treated as binary.
const MAX_CONTROL_RATIO: f64 = 0.1;

/// Plain text with best-effort encoding detection:
/// BOM, then UTF-16 without BOM, then strict UTF-8, then Windows-1252.
pub struct PlainTextLoader;

impl DocumentLoader for PlainTextLoader {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentLoadError> {
        let text = decode(bytes)?;
        if looks_binary(&text) {
            return Err(DocumentLoadError::UndetectableEncoding);
        }
        Ok(text)
    }
}

fn decode(bytes: &[u8]) -> Result<String, DocumentLoadError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_strict(encoding, &bytes[bom_len..]);
    }
    if let Some(encoding) = sniff_utf16(bytes) {
        return decode_strict(encoding, bytes);
    }
    if bytes.contains(&0) {
        return Err(DocumentLoadError::UndetectableEncoding);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            Ok(text.into_owned())
        }
    }
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, DocumentLoadError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DocumentLoadError::UndetectableEncoding);
    }
    Ok(text.into_owned())
}

/// BOM-less UTF-16: mostly-ASCII text leaves every other byte zero.
fn sniff_utf16(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.len() < 4 || bytes.len() % 2 != 0 {
        return None;
    }
    let pairs = bytes.len() / 2;
    let even_zero = bytes.iter().step_by(2).filter(|b| **b == 0).count();
    let odd_zero = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
    let threshold = pairs * 9 / 10;
    if odd_zero >= threshold && even_zero == 0 {
        Some(UTF_16LE)
    } else if even_zero >= threshold && odd_zero == 0 {
        Some(UTF_16BE)
    } else {
        None
    }
}

fn looks_binary(text: &str) -> bool {
    let total = text.chars().count();
    if total == 0 {
        return false;
    }
    let control = text
        .chars()
        .filter(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\u{0c}'))
        .count();
    control as f64 / total as f64 > MAX_CONTROL_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passes_through() {
        let text = PlainTextLoader.extract("Zoë Doe\n".as_bytes()).unwrap();
        assert_eq!(text, "Zoë Doe\n");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let text = PlainTextLoader.extract(b"\xEF\xBB\xBFJane").unwrap();
        assert_eq!(text, "Jane");
    }

    #[test]
    fn test_utf16le_with_and_without_bom() {
        let encoded: Vec<u8> = "Jane Doe".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        assert_eq!(PlainTextLoader.extract(&encoded).unwrap(), "Jane Doe");

        let mut with_bom = vec![0xFF, 0xFE];
        with_bom.extend_from_slice(&encoded);
        assert_eq!(PlainTextLoader.extract(&with_bom).unwrap(), "Jane Doe");
    }

    #[test]
    fn test_latin1_falls_back_to_windows_1252() {
        let text = PlainTextLoader.extract(b"Jos\xE9 Garc\xEDa").unwrap();
        assert_eq!(text, "José García");
    }

    #[test]
    fn test_binary_input_is_undetectable() {
        let err = PlainTextLoader.extract(&[0x00, 0x01, 0x02, 0xFF, 0x00, 0x13, 0x37]).unwrap_err();
        assert!(matches!(err, DocumentLoadError::UndetectableEncoding));

        let err = PlainTextLoader.extract(b"\x01\x02\x03\x04abc").unwrap_err();
        assert!(matches!(err, DocumentLoadError::UndetectableEncoding));
    }
}
