use std::sync::OnceLock;

use regex::Regex;

use super::{date_range_regex, require_section, Extractor};
use crate::errors::ExtractionError;
use crate::lexicon::{CourseCorpus, Lexicons};
use crate::profile::EducationRecord;
use crate::segmenter::{SectionKind, SegmentedDocument};

fn institution_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)college|institute|school|university").expect("institution pattern is valid")
    })
}

/// Dates, institution lines, and degree fragments of an education section.
///
/// The three lists are filled independently; position `i` in one list says
/// nothing about position `i` in another.
pub fn extract_education(lines: &[String], courses: &CourseCorpus) -> EducationRecord {
    let joined = lines.join("\n");

    let dates = date_range_regex()
        .find_iter(&joined)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    let institutions = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| institution_regex().is_match(line))
        .map(str::to_string)
        .collect();

    let degrees = lines
        .iter()
        .flat_map(|line| courses.matches(line))
        .map(str::to_string)
        .collect();

    EducationRecord {
        dates,
        institutions,
        degrees,
    }
}

pub struct EducationExtractor;

impl Extractor for EducationExtractor {
    type Output = EducationRecord;

    fn name(&self) -> &'static str {
        "education"
    }

    fn extract(
        &self,
        doc: &SegmentedDocument,
        lexicons: &Lexicons,
    ) -> Result<EducationRecord, ExtractionError> {
        let section = require_section(doc, SectionKind::Education)?;
        let record = extract_education(&section.lines, &lexicons.courses);
        if record.is_empty() && !section.lines.is_empty() {
            return Err(ExtractionError::Unclassifiable(format!(
                "no dates, institutions, or degrees in {} education lines",
                section.lines.len()
            )));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> CourseCorpus {
        CourseCorpus::new(["Bachelor of Science", "Bachelor", "Master", "MBA"])
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_extracts_dates_institutions_and_degrees() {
        let record = extract_education(&lines("Bachelor of Science\nMIT College\n2016-2020"), &corpus());
        assert_eq!(record.dates, vec!["2016-2020"]);
        assert_eq!(record.institutions, vec!["MIT College"]);
        assert!(record.degrees.iter().any(|d| d.contains("Bachelor")));
    }

    #[test]
    fn test_one_line_can_contribute_several_degrees() {
        let record = extract_education(&lines("MBA and Master of Arts, 2012 - 2014"), &corpus());
        assert_eq!(record.degrees, vec!["Master", "MBA"]);
        assert_eq!(record.dates, vec!["2012 - 2014"]);
        assert!(record.institutions.is_empty());
    }

    #[test]
    fn test_lists_are_not_correlated() {
        let record = extract_education(
            &lines("Stanford University\nHigh School, Pune\n2010\nMaster\n2018 - Present"),
            &corpus(),
        );
        assert_eq!(record.institutions, vec!["Stanford University", "High School, Pune"]);
        assert_eq!(record.dates, vec!["2010", "2018 - Present"]);
        assert_eq!(record.degrees, vec!["Master"]);
    }

    #[test]
    fn test_institution_match_ignores_case() {
        let record = extract_education(&lines("NATIONAL INSTITUTE OF DESIGN"), &corpus());
        assert_eq!(record.institutions, vec!["NATIONAL INSTITUTE OF DESIGN"]);
    }

    #[test]
    fn test_empty_section_yields_empty_record() {
        assert!(extract_education(&[], &corpus()).is_empty());
    }
}
