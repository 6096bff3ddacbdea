use std::panic;

use tracing::warn;

use super::{trim_leading_whitespace, DocumentFormat, DocumentLoader};
use crate::errors::DocumentLoadError;

/// Layout-aware text extraction via `pdf-extract`. Line breaks are kept.
pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentLoadError> {
        if !trim_leading_whitespace(bytes).starts_with(b"%PDF") {
            return Err(DocumentLoadError::Corrupt(
                DocumentFormat::Pdf,
                "missing %PDF header".to_string(),
            ));
        }

        // pdf-extract panics on some malformed streams instead of returning Err.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(DocumentLoadError::Corrupt(DocumentFormat::Pdf, e.to_string())),
            Err(_) => {
                warn!("PDF decoder panicked on malformed input");
                Err(DocumentLoadError::Corrupt(
                    DocumentFormat::Pdf,
                    "decoder aborted on malformed content".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bytes_without_pdf_header() {
        let err = PdfLoader.extract(b"Jane Doe\nEngineer").unwrap_err();
        assert!(matches!(err, DocumentLoadError::Corrupt(DocumentFormat::Pdf, _)));
    }

    #[test]
    fn test_truncated_pdf_is_corrupt() {
        let err = PdfLoader.extract(b"%PDF-1.4\n1 0 obj\n<<").unwrap_err();
        assert!(matches!(err, DocumentLoadError::Corrupt(DocumentFormat::Pdf, _)));
    }
}
