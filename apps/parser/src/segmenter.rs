//! Section segmentation: a single pass over normalized lines that files each
//! line under the canonical section its nearest preceding header names.
//!
//! Only the first contiguous block of each kind is kept. A later header of a
//! kind that has already been closed starts a discarded block, so repeated
//! "Experience" headers never reopen or extend the first one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::SectionAliasTable;
use crate::loader::NormalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Education,
    Skills,
    Experience,
    Projects,
    Summary,
    Certifications,
    /// Lines before the first recognised header.
    Unknown,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Summary => "summary",
            SectionKind::Certifications => "certifications",
            SectionKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, non-blank lines filed under one kind. A header line is not stored,
/// but text after its colon is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

impl Section {
    fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Normalized text plus its sections. Read-only input to every extractor.
#[derive(Debug, Clone)]
pub struct SegmentedDocument {
    text: NormalizedText,
    preamble: Section,
    sections: BTreeMap<SectionKind, Section>,
}

impl SegmentedDocument {
    pub fn text(&self) -> &NormalizedText {
        &self.text
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        if kind == SectionKind::Unknown {
            return Some(&self.preamble);
        }
        self.sections.get(&kind)
    }
}

#[derive(Clone, Copy)]
enum Cursor {
    Preamble,
    Open(SectionKind),
    /// Inside a repeated header of an already-closed kind.
    Discarding(SectionKind),
}

pub fn segment(text: NormalizedText, aliases: &SectionAliasTable) -> SegmentedDocument {
    let mut preamble = Section::new(SectionKind::Unknown);
    let mut sections: BTreeMap<SectionKind, Section> = BTreeMap::new();
    let mut cursor = Cursor::Preamble;
    let mut discarded = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let header = aliases.match_section(line);
        match (header, cursor) {
            // Repeated header inside its own block is ordinary content.
            (Some(kind), Cursor::Open(open)) if kind == open => {
                push_line(&mut sections, kind, line);
            }
            (Some(kind), Cursor::Discarding(open)) if kind == open => {
                discarded += 1;
            }
            (Some(kind), _) => {
                cursor = if sections.contains_key(&kind) {
                    Cursor::Discarding(kind)
                } else {
                    let mut section = Section::new(kind);
                    if let Some(rest) = inline_content(line) {
                        section.lines.push(rest.to_string());
                    }
                    sections.insert(kind, section);
                    Cursor::Open(kind)
                };
            }
            (None, Cursor::Preamble) => preamble.lines.push(line.to_string()),
            (None, Cursor::Open(kind)) => push_line(&mut sections, kind, line),
            (None, Cursor::Discarding(_)) => discarded += 1,
        }
    }

    debug!(
        preamble_lines = preamble.lines.len(),
        sections = sections.len(),
        discarded,
        "segmented document"
    );

    SegmentedDocument {
        text,
        preamble,
        sections,
    }
}

/// "Skills: Rust, Go" → "Rust, Go".
fn inline_content(header: &str) -> Option<&str> {
    let (_, rest) = header.split_once(':')?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

fn push_line(sections: &mut BTreeMap<SectionKind, Section>, kind: SectionKind, line: &str) {
    if let Some(section) = sections.get_mut(&kind) {
        section.lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_lines(lines: &[&str]) -> SegmentedDocument {
        let text = NormalizedText::normalize(&lines.join("\n"));
        segment(text, &SectionAliasTable::default())
    }

    fn lines_of(doc: &SegmentedDocument, kind: SectionKind) -> Vec<String> {
        doc.section(kind).map(|s| s.lines.clone()).unwrap_or_default()
    }

    #[test]
    fn test_classifies_lines_under_nearest_header() {
        let doc = segment_lines(&[
            "Objective",
            "Summary text",
            "Skills",
            "Python, Go",
            "Education",
            "MIT 2020",
        ]);
        assert_eq!(lines_of(&doc, SectionKind::Summary), vec!["Summary text"]);
        assert_eq!(lines_of(&doc, SectionKind::Skills), vec!["Python, Go"]);
        assert_eq!(lines_of(&doc, SectionKind::Education), vec!["MIT 2020"]);
        assert!(lines_of(&doc, SectionKind::Unknown).is_empty());
    }

    #[test]
    fn test_lines_before_first_header_form_preamble() {
        let doc = segment_lines(&["Jane Doe", "jane@example.com", "", "Experience", "Acme"]);
        assert_eq!(
            lines_of(&doc, SectionKind::Unknown),
            vec!["Jane Doe", "jane@example.com"]
        );
        assert_eq!(
            doc.section(SectionKind::Unknown).map(|s| s.kind),
            Some(SectionKind::Unknown)
        );
        assert_eq!(lines_of(&doc, SectionKind::Experience), vec!["Acme"]);
    }

    #[test]
    fn test_only_first_block_of_a_kind_is_kept() {
        let doc = segment_lines(&[
            "Experience",
            "Acme",
            "Education",
            "State University",
            "Experience",
            "Globex",
            "Projects",
            "Compiler",
        ]);
        assert_eq!(lines_of(&doc, SectionKind::Experience), vec!["Acme"]);
        assert_eq!(lines_of(&doc, SectionKind::Education), vec!["State University"]);
        assert_eq!(lines_of(&doc, SectionKind::Projects), vec!["Compiler"]);
    }

    #[test]
    fn test_text_after_header_colon_opens_the_section() {
        let doc = segment_lines(&[
            "Technical Skills: Python, Java, Docker",
            "Education: B.Tech, Pune University, 2016-2020",
            "MIT 2021",
            "Experience:",
        ]);
        assert_eq!(lines_of(&doc, SectionKind::Skills), vec!["Python, Java, Docker"]);
        assert_eq!(
            lines_of(&doc, SectionKind::Education),
            vec!["B.Tech, Pune University, 2016-2020", "MIT 2021"]
        );
        assert!(lines_of(&doc, SectionKind::Experience).is_empty());
    }

    #[test]
    fn test_empty_header_still_creates_section() {
        let doc = segment_lines(&["Certifications"]);
        assert_eq!(
            doc.section(SectionKind::Certifications).map(|s| s.lines.len()),
            Some(0)
        );
        assert!(doc.section(SectionKind::Skills).is_none());
        assert!(doc.section(SectionKind::Education).is_none());
    }

    #[test]
    fn test_blank_input_yields_no_sections() {
        let doc = segment_lines(&["", "   "]);
        assert!(lines_of(&doc, SectionKind::Unknown).is_empty());
        assert!(doc.section(SectionKind::Skills).is_none());
        assert!(doc.section(SectionKind::Experience).is_none());
    }
}
