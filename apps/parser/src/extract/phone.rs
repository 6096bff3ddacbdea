use std::sync::OnceLock;

use regex::Regex;

use super::Extractor;
use crate::errors::ExtractionError;
use crate::lexicon::Lexicons;
use crate::segmenter::SegmentedDocument;

const MIN_DIGITS: usize = 10;

fn phone_candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\+?\(?\d[\d ().\-]{6,}\d").expect("phone pattern is valid")
    })
}

/// Phone numbers in document order, reduced to digits plus an optional
/// leading `+`. Candidates with fewer than ten digits are dropped.
pub fn extract_phones(text: &str) -> Vec<String> {
    phone_candidate_regex()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| digit_count(candidate) >= MIN_DIGITS)
        .filter(|candidate| !is_date_like(candidate))
        .map(normalize_phone)
        .collect()
}

fn digit_count(candidate: &str) -> usize {
    candidate.chars().filter(char::is_ascii_digit).count()
}

/// Runs of years and short month numbers ("2016 - 2020 2020 - 2022",
/// "01.2019 - 12.2021") are dates, not phone numbers.
fn is_date_like(candidate: &str) -> bool {
    let groups: Vec<&str> = candidate
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .collect();
    let is_year = |g: &&str| g.len() == 4 && (g.starts_with("19") || g.starts_with("20"));
    groups.iter().any(is_year) && groups.iter().all(|g| is_year(g) || g.len() <= 2)
}

fn normalize_phone(candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len());
    if candidate.starts_with('+') {
        out.push('+');
    }
    out.extend(candidate.chars().filter(char::is_ascii_digit));
    out
}

pub struct PhoneExtractor;

impl Extractor for PhoneExtractor {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "phone"
    }

    fn extract(
        &self,
        doc: &SegmentedDocument,
        _lexicons: &Lexicons,
    ) -> Result<Vec<String>, ExtractionError> {
        Ok(extract_phones(doc.text().as_str()))
    }
}
