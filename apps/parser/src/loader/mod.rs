//! Document loading: raw bytes of a declared format into normalized text.
//!
//! Each `DocumentFormat` owns one `DocumentLoader`. The format is chosen once,
//! at the pipeline boundary, and nothing downstream branches on it again.

pub mod docx;
pub mod normalize;
pub mod pdf;
pub mod rtf;
pub mod text;

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DocumentLoadError;

pub use normalize::NormalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Rtf,
    #[serde(rename = "txt")]
    PlainText,
}

impl DocumentFormat {
    /// Maps a declared tag or file extension (with or without the dot).
    pub fn from_extension(tag: &str) -> Result<Self, DocumentLoadError> {
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "rtf" => Ok(DocumentFormat::Rtf),
            "txt" | "text" | "md" => Ok(DocumentFormat::PlainText),
            _ => Err(DocumentLoadError::UnsupportedFormat(tag.to_string())),
        }
    }

    /// Recognises a format from its leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        let head = trim_leading_whitespace(bytes);
        if head.starts_with(b"%PDF") {
            Some(DocumentFormat::Pdf)
        } else if head.starts_with(b"PK\x03\x04") {
            Some(DocumentFormat::Docx)
        } else if head.starts_with(b"{\\rtf") {
            Some(DocumentFormat::Rtf)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Rtf => "rtf",
            DocumentFormat::PlainText => "txt",
        }
    }

    fn loader(&self) -> &'static dyn DocumentLoader {
        match self {
            DocumentFormat::Pdf => &pdf::PdfLoader,
            DocumentFormat::Docx => &docx::DocxLoader,
            DocumentFormat::Rtf => &rtf::RtfLoader,
            DocumentFormat::PlainText => &text::PlainTextLoader,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts the bytes of one format into raw text with line breaks intact.
pub trait DocumentLoader: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentLoadError>;
}

/// An uploaded document. Immutable; consumed only by `load`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    /// Format from magic bytes, falling back to plain text.
    pub fn sniffed(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let format = DocumentFormat::sniff(&bytes).unwrap_or(DocumentFormat::PlainText);
        Self { bytes, format }
    }
}

/// Extracts and normalizes the document text. Empty output is an error.
pub fn load(document: &RawDocument) -> Result<NormalizedText, DocumentLoadError> {
    let raw = document.format.loader().extract(&document.bytes)?;
    let text = NormalizedText::normalize(&raw);
    if text.is_blank() {
        return Err(DocumentLoadError::Empty(document.format));
    }
    debug!(
        format = %document.format,
        bytes = document.bytes.len(),
        lines = text.lines().count(),
        "document loaded"
    );
    Ok(text)
}

fn trim_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}
