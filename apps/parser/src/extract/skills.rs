use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::{require_section, Extractor};
use crate::errors::ExtractionError;
use crate::lexicon::{Lexicons, SkillSynonymMap};
use crate::segmenter::{SectionKind, SegmentedDocument};

/// Unmatched tokens longer than this are sentence fragments, not skills.
const MAX_FREEFORM_WORDS: usize = 3;

/// Line breaks, pipes, and bullets. After transliteration `▪` reads as `#`
/// and `➢` as `>`, so those only count when free-standing (`C#` survives).
fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)[\n|*\u{2022}\u{00b7}\u{25aa}\u{27a2}]|(?:^|\s)(?:[#>o]+|-+)(?:\s|$)")
            .expect("separator pattern is valid")
    })
}

/// Skills listed in the given section lines. Lexicon hits are reported by
/// canonical name; other short tokens are kept verbatim in title case.
pub fn extract_skills(lines: &[String], skills: &SkillSynonymMap) -> BTreeSet<String> {
    let joined = lines.join("\n");
    let comma_separated = separator_regex().replace_all(&joined, ",");

    let mut found = BTreeSet::new();
    for raw in comma_separated.split([',', ';']) {
        // Only trailing dots go: ".NET" keeps its leading one.
        let token = strip_label(raw).trim().trim_end_matches('.').trim_end();
        if token.is_empty() {
            continue;
        }
        if let Some(canonical) = skills.lookup(token) {
            found.insert(canonical.to_string());
        } else if token.split_whitespace().count() <= MAX_FREEFORM_WORDS {
            found.insert(title_case(token));
        }
    }
    found
}

/// "Languages: Python" → "Python".
fn strip_label(token: &str) -> &str {
    token.rsplit(':').next().unwrap_or(token)
}

/// Upper-cases the first letter of each word; the rest is left as written.
fn title_case(token: &str) -> String {
    token
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads only the skills section; with no such section the result is empty.
pub struct SkillsExtractor;

impl Extractor for SkillsExtractor {
    type Output = BTreeSet<String>;

    fn name(&self) -> &'static str {
        "skills"
    }

    fn extract(
        &self,
        doc: &SegmentedDocument,
        lexicons: &Lexicons,
    ) -> Result<BTreeSet<String>, ExtractionError> {
        let section = require_section(doc, SectionKind::Skills)?;
        Ok(extract_skills(&section.lines, &lexicons.skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::NormalizedText;

    fn lexicon() -> SkillSynonymMap {
        SkillSynonymMap::from_json(
            r#"{"Go": ["golang"], "Python": ["python3"], "Machine Learning": ["ml"]}"#,
        )
        .unwrap()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_aliases_map_to_canonical_names() {
        let found = extract_skills(&lines(&["GOLANG, python3; ML"]), &lexicon());
        assert_eq!(found, set(&["Go", "Machine Learning", "Python"]));
    }

    #[test]
    fn test_bullets_and_lines_split_tokens() {
        let found = extract_skills(
            &lines(&["* Python", "- Go", "kubernetes | terraform", "Objective-C"]),
            &lexicon(),
        );
        assert_eq!(
            found,
            set(&["Go", "Kubernetes", "Objective-C", "Python", "Terraform"])
        );
    }

    #[test]
    fn test_long_unmatched_tokens_are_discarded() {
        let found = extract_skills(
            &lines(&["Python, worked closely with the design team"]),
            &lexicon(),
        );
        assert_eq!(found, set(&["Python"]));
    }

    #[test]
    fn test_label_prefix_is_dropped() {
        let found = extract_skills(&lines(&["Languages: golang, rust", "Tools: git."]), &lexicon());
        assert_eq!(found, set(&["Git", "Go", "Rust"]));
    }

    #[test]
    fn test_transliterated_bullets_split_tokens() {
        let text = NormalizedText::normalize(
            "\u{25aa} Python \u{25aa} Docker \u{2022} Kubernetes\n\u{27a2} Terraform\n# golang",
        );
        let section: Vec<String> = text.lines().map(String::from).collect();
        let found = extract_skills(&section, &lexicon());
        assert_eq!(found, set(&["Docker", "Go", "Kubernetes", "Python", "Terraform"]));
    }

    #[test]
    fn test_dotted_and_hash_names_survive() {
        let found = extract_skills(&lines(&["C#, .NET, ASP.NET, F#."]), &lexicon());
        assert_eq!(found, set(&[".NET", "ASP.NET", "C#", "F#"]));
    }

    #[test]
    fn test_title_case_keeps_acronyms() {
        assert_eq!(title_case("distributed systems"), "Distributed Systems");
        assert_eq!(title_case("AWS lambda"), "AWS Lambda");
    }

    #[test]
    fn test_empty_section_yields_empty_set() {
        assert!(extract_skills(&[], &lexicon()).is_empty());
        assert!(extract_skills(&lines(&[" , ; "]), &lexicon()).is_empty());
    }
}
