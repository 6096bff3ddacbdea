use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::loader::DocumentFormat;
use crate::segmenter::SectionKind;

/// Fatal failure turning raw bytes into normalized text.
/// No partial profile is produced when this is returned.
#[derive(Debug, Error)]
pub enum DocumentLoadError {
    #[error("Corrupt {0} document: {1}")]
    Corrupt(DocumentFormat, String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not detect a text encoding for the document")]
    UndetectableEncoding,

    #[error("No text could be extracted from the {0} document")]
    Empty(DocumentFormat),
}

/// Local failure of a single extractor. Never escapes the pipeline:
/// the aggregator substitutes the extractor's empty value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("Section '{0}' not present in document")]
    MissingSection(SectionKind),

    #[error("Input could not be classified: {0}")]
    Unclassifiable(String),
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Malformed lexicon file {0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Lexicon file {0} has no entries")]
    Empty(PathBuf),
}

/// Top-level error for one parse call.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Document load failed: {0}")]
    Load(#[from] DocumentLoadError),

    #[error("Parse exceeded the {0:?} time limit")]
    Timeout(Duration),

    #[error("Parser worker pool is unavailable")]
    WorkerUnavailable,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ParseError {
    /// Stable machine-readable code, used by the CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Load(DocumentLoadError::Corrupt(..)) => "CORRUPT_DOCUMENT",
            ParseError::Load(DocumentLoadError::UnsupportedFormat(_)) => "UNSUPPORTED_FORMAT",
            ParseError::Load(DocumentLoadError::UndetectableEncoding) => "UNDETECTABLE_ENCODING",
            ParseError::Load(DocumentLoadError::Empty(_)) => "EMPTY_DOCUMENT",
            ParseError::Timeout(_) => "TIMEOUT",
            ParseError::WorkerUnavailable => "WORKER_UNAVAILABLE",
            ParseError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "INTERNAL_ERROR"
            }
        }
    }
}
