//! Work experience: positional backtracking around date "anchor" lines.
//!
//! For each line carrying a date range:
//! 1. up to 3 preceding lines are scanned nearest-first for non-date lines;
//!    at most two are kept and assigned in reading order to role, company
//! 2. if a slot is still empty, the anchor's own text outside the date fills it
//! 3. up to 5 following non-date lines become the details
//!
//! Overlapping or malformed anchors may yield duplicate or partial records.

use super::{date_range_regex, require_section, Extractor};
use crate::errors::ExtractionError;
use crate::lexicon::Lexicons;
use crate::profile::ExperienceRecord;
use crate::segmenter::{SectionKind, SegmentedDocument};

const BACKTRACK_WINDOW: usize = 3;
const DETAILS_WINDOW: usize = 5;

pub fn extract_experience(lines: &[String]) -> Vec<ExperienceRecord> {
    let dates = date_range_regex();
    let mut records = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let spans: Vec<&str> = dates.find_iter(line).map(|m| m.as_str().trim()).collect();
        if spans.is_empty() {
            continue;
        }

        let mut slots: Vec<String> = lines[index.saturating_sub(BACKTRACK_WINDOW)..index]
            .iter()
            .rev()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !dates.is_match(l))
            .take(2)
            .map(str::to_string)
            .collect();
        slots.reverse();

        if slots.len() < 2 {
            let residual = anchor_residual(line);
            if !residual.is_empty() {
                slots.push(residual);
            }
        }
        let mut slots = slots.into_iter();

        let details = lines[index + 1..]
            .iter()
            .take(DETAILS_WINDOW)
            .take_while(|l| !dates.is_match(l))
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        records.push(ExperienceRecord {
            role: slots.next().unwrap_or_default(),
            company: slots.next().unwrap_or_default(),
            duration: spans.join(" - "),
            details,
        });
    }
    records
}

/// Anchor text with the dates removed, e.g. "Acme Corp | 2019-2021" → "Acme Corp".
fn anchor_residual(line: &str) -> String {
    let stripped = date_range_regex().replace_all(line, " ");
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '|' | '-' | ':' | '(' | ')'))
        .to_string()
}

pub struct ExperienceExtractor;

impl Extractor for ExperienceExtractor {
    type Output = Vec<ExperienceRecord>;

    fn name(&self) -> &'static str {
        "experience"
    }

    fn extract(
        &self,
        doc: &SegmentedDocument,
        _lexicons: &Lexicons,
    ) -> Result<Vec<ExperienceRecord>, ExtractionError> {
        let section = require_section(doc, SectionKind::Experience)?;
        let records = extract_experience(&section.lines);
        if records.is_empty() && !section.lines.is_empty() {
            return Err(ExtractionError::Unclassifiable(format!(
                "no date anchors in {} experience lines",
                section.lines.len()
            )));
        }
        Ok(records)
    }
}
