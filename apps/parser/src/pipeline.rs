//! The synchronous parse pipeline for one document:
//! bytes → loader → normalized text → segmenter → extractors → profile.

use std::sync::Arc;

use tracing::{info, info_span};
use uuid::Uuid;

use crate::errors::ParseError;
use crate::extract::{
    run, EducationExtractor, EmailExtractor, ExperienceExtractor, NameExtractor, PhoneExtractor,
    SkillsExtractor,
};
use crate::lexicon::Lexicons;
use crate::loader::{self, NormalizedText, RawDocument};
use crate::profile::CandidateProfile;
use crate::segmenter::{segment, SegmentedDocument};

/// Anything that can turn a raw document into a profile.
/// `ParserService` holds one as `Arc<dyn DocumentParser>`.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, document: &RawDocument) -> Result<CandidateProfile, ParseError>;
}

/// Lexicon-driven resume parser. Holds no per-document state, so one
/// instance serves any number of concurrent parses.
#[derive(Debug, Clone)]
pub struct ResumeParser {
    lexicons: Arc<Lexicons>,
}

impl ResumeParser {
    pub fn new(lexicons: Arc<Lexicons>) -> Self {
        Self { lexicons }
    }

    /// Parses already-extracted text. Never fails: extractor errors become
    /// empty fields.
    pub fn parse_text(&self, text: NormalizedText) -> CandidateProfile {
        let doc = segment(text, &self.lexicons.sections);
        self.aggregate(&doc)
    }

    fn aggregate(&self, doc: &SegmentedDocument) -> CandidateProfile {
        let lexicons = self.lexicons.as_ref();
        CandidateProfile {
            names: run(&NameExtractor, doc, lexicons),
            emails: run(&EmailExtractor, doc, lexicons),
            phones: run(&PhoneExtractor, doc, lexicons),
            skills: run(&SkillsExtractor, doc, lexicons),
            education: run(&EducationExtractor, doc, lexicons),
            experience: run(&ExperienceExtractor, doc, lexicons),
        }
    }
}

impl DocumentParser for ResumeParser {
    fn parse(&self, document: &RawDocument) -> Result<CandidateProfile, ParseError> {
        let span = info_span!("parse", job_id = %Uuid::new_v4(), format = %document.format);
        let _guard = span.enter();

        let text = loader::load(document)?;
        let profile = self.parse_text(text);
        info!(
            names = profile.names.len(),
            emails = profile.emails.len(),
            phones = profile.phones.len(),
            skills = profile.skills.len(),
            experience = profile.experience.len(),
            "parsed resume"
        );
        Ok(profile)
    }
}
