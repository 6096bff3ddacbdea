pub mod config;
pub mod errors;
pub mod extract;
pub mod lexicon;
pub mod loader;
pub mod pipeline;
pub mod profile;
pub mod segmenter;
pub mod service;

pub use errors::{DocumentLoadError, ExtractionError, LexiconError, ParseError};
pub use lexicon::Lexicons;
pub use loader::{DocumentFormat, RawDocument};
pub use pipeline::{DocumentParser, ResumeParser};
pub use profile::{CandidateProfile, EducationRecord, ExperienceRecord};
pub use service::ParserService;
