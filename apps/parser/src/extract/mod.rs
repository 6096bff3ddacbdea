//! Field extractors.
//!
//! Every extractor reads only the segmented document and the lexicons, and
//! returns a tagged `Result`. The aggregator turns any `Err` into the
//! extractor's empty value, so one bad field never sinks the whole profile.

pub mod education;
pub mod email;
pub mod experience;
pub mod name;
pub mod phone;
pub mod skills;

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::errors::ExtractionError;
use crate::lexicon::Lexicons;
use crate::segmenter::{Section, SectionKind, SegmentedDocument};

pub use education::EducationExtractor;
pub use email::EmailExtractor;
pub use experience::ExperienceExtractor;
pub use name::NameExtractor;
pub use phone::PhoneExtractor;
pub use skills::SkillsExtractor;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const YEAR: &str = r"(?:19[7-9]\d|2\d{3})";

/// A year (1970 to 2999), optionally month-prefixed, optionally followed by an
/// end year or an open-ended marker. Shared by education and experience.
pub fn date_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let point = format!(r"(?:{MONTH}[ ,']*)?{YEAR}\b");
        let pattern = format!(
            r"(?i)\b{point}(?:[ ]*(?:-|to)?[ ]*(?:{point}|present\b|current\b|ongoing\b|till date\b))?"
        );
        Regex::new(&pattern).expect("date range pattern is valid")
    })
}

/// One field extractor. `Output::default()` is its declared empty result.
pub trait Extractor {
    type Output: Default;

    fn name(&self) -> &'static str;

    fn extract(
        &self,
        doc: &SegmentedDocument,
        lexicons: &Lexicons,
    ) -> Result<Self::Output, ExtractionError>;
}

/// Runs an extractor, substituting its empty result on failure.
pub fn run<E: Extractor>(extractor: &E, doc: &SegmentedDocument, lexicons: &Lexicons) -> E::Output {
    match extractor.extract(doc, lexicons) {
        Ok(output) => output,
        Err(e @ ExtractionError::MissingSection(_)) => {
            debug!(extractor = extractor.name(), "{e}");
            E::Output::default()
        }
        Err(e) => {
            warn!(extractor = extractor.name(), "Extraction failed: {e}");
            E::Output::default()
        }
    }
}

/// The named section, or `MissingSection`.
pub(crate) fn require_section(
    doc: &SegmentedDocument,
    kind: SectionKind,
) -> Result<&Section, ExtractionError> {
    doc.section(kind).ok_or(ExtractionError::MissingSection(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(text: &str) -> Vec<&str> {
        date_range_regex().find_iter(text).map(|m| m.as_str().trim()).collect()
    }

    #[test]
    fn test_date_range_plain_years() {
        assert_eq!(dates("2016-2020"), vec!["2016-2020"]);
        assert_eq!(dates("2016 - 2020"), vec!["2016 - 2020"]);
        assert_eq!(dates("MIT 2020"), vec!["2020"]);
    }

    #[test]
    fn test_date_range_open_ended() {
        assert_eq!(dates("2019 - Present"), vec!["2019 - Present"]);
        assert_eq!(dates("2021 to current"), vec!["2021 to current"]);
        assert_eq!(dates("since 2022 ongoing"), vec!["2022 ongoing"]);
    }

    #[test]
    fn test_date_range_with_months() {
        assert_eq!(dates("Jan 2019 - Mar 2021"), vec!["Jan 2019 - Mar 2021"]);
        assert_eq!(dates("Sept. 2018 to Present"), vec!["Sept. 2018 to Present"]);
    }

    #[test]
    fn test_date_range_ignores_out_of_range_and_embedded_digits() {
        assert!(dates("Class of 1969").is_empty());
        assert!(dates("Call 9876543210").is_empty());
        assert!(dates("Built 3 services").is_empty());
    }
}
