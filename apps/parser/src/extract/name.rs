use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::Extractor;
use crate::errors::ExtractionError;
use crate::lexicon::{Lexicons, NameGenderLists};
use crate::segmenter::SegmentedDocument;

/// Substrings that mark the end of the header block holding the name.
const HEADER_BLOCK_TERMINATORS: &[&str] = &["skill", "objective", "experience", "summary", "education"];

fn name_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bname\b").expect("name label pattern is valid"))
}

/// Lines from the top of the document up to the first section-like keyword.
pub fn header_block(text: &str) -> Vec<&str> {
    text.lines()
        .take_while(|line| {
            let lower = line.to_lowercase();
            !HEADER_BLOCK_TERMINATORS.iter().any(|k| lower.contains(k))
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Every plausible name line in the header block. Ambiguity is surfaced as
/// several candidates rather than resolved.
pub fn extract_names(text: &str, names: &NameGenderLists) -> BTreeSet<String> {
    let block = header_block(text);
    let mut candidates = BTreeSet::new();

    for line in &block {
        if name_label_regex().is_match(line) {
            let remainder = name_label_regex().replace_all(line, "");
            let remainder = remainder
                .trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '=' | '|'));
            if !remainder.is_empty() {
                candidates.insert(remainder.to_string());
            }
        } else if line.chars().any(|c| c.is_ascii_digit()) {
            continue;
        } else if line.split_whitespace().any(|token| names.contains(token)) {
            candidates.insert(line.to_string());
        }
    }

    if candidates.is_empty() {
        if let Some(first) = block.first() {
            candidates.insert(first.to_string());
        }
    }
    candidates
}

pub struct NameExtractor;

impl Extractor for NameExtractor {
    type Output = BTreeSet<String>;

    fn name(&self) -> &'static str {
        "name"
    }

    fn extract(
        &self,
        doc: &SegmentedDocument,
        lexicons: &Lexicons,
    ) -> Result<BTreeSet<String>, ExtractionError> {
        Ok(extract_names(doc.text().as_str(), &lexicons.names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> NameGenderLists {
        NameGenderLists::from_lines("rahul\njohn\n", "priya\n")
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_block_stops_at_section_keyword() {
        let text = "Rahul Sharma\n\nPune\nCareer Objective\nJohn Smith";
        assert_eq!(header_block(text), vec!["Rahul Sharma", "Pune"]);
    }

    #[test]
    fn test_lexicon_hit_adds_whole_line() {
        let text = "RAHUL SHARMA\nSoftware Engineer\nSkills\nRust";
        assert_eq!(extract_names(text, &names()), set(&["RAHUL SHARMA"]));
    }

    #[test]
    fn test_name_label_is_stripped() {
        let text = "Name: Arjun Mehta\nPhone 9876543210\nExperience";
        assert_eq!(extract_names(text, &names()), set(&["Arjun Mehta"]));
    }

    #[test]
    fn test_lines_with_digits_are_skipped() {
        let text = "John 42 Street\nPriya Nair\nSkills";
        assert_eq!(extract_names(text, &names()), set(&["Priya Nair"]));
    }

    #[test]
    fn test_multiple_candidates_are_all_kept() {
        let text = "John Doe\nPriya Doe\nObjective";
        assert_eq!(extract_names(text, &names()), set(&["John Doe", "Priya Doe"]));
    }

    #[test]
    fn test_falls_back_to_first_line() {
        let text = "Xavier Quill\nLondon\nExperience";
        assert_eq!(extract_names(text, &names()), set(&["Xavier Quill"]));
    }

    #[test]
    fn test_empty_header_block_yields_nothing() {
        assert!(extract_names("", &names()).is_empty());
        assert!(extract_names("Skills\nRahul", &names()).is_empty());
    }
}
