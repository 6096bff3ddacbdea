use std::sync::OnceLock;

use regex::Regex;

use super::Extractor;
use crate::errors::ExtractionError;
use crate::lexicon::Lexicons;
use crate::segmenter::SegmentedDocument;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*")
            .expect("email pattern is valid")
    })
}

/// Every email-shaped token in document order, duplicates kept, case preserved.
pub fn extract_emails(text: &str) -> Vec<String> {
    email_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Scans the full text; contact details often sit outside any section.
pub struct EmailExtractor;

impl Extractor for EmailExtractor {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "email"
    }

    fn extract(
        &self,
        doc: &SegmentedDocument,
        _lexicons: &Lexicons,
    ) -> Result<Vec<String>, ExtractionError> {
        Ok(extract_emails(doc.text().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_emails_in_order_with_duplicates() {
        let text = "Jane.Doe@Example.com | jane@work.io\nContact: Jane.Doe@Example.com.";
        assert_eq!(
            extract_emails(text),
            vec!["Jane.Doe@Example.com", "jane@work.io", "Jane.Doe@Example.com"]
        );
    }

    #[test]
    fn test_plus_addressing_and_subdomains() {
        assert_eq!(
            extract_emails("mail: a.b+jobs@mail.cs.uni.edu"),
            vec!["a.b+jobs@mail.cs.uni.edu"]
        );
    }

    #[test]
    fn test_single_label_domain_is_accepted() {
        assert_eq!(extract_emails("root: jane@localhost."), vec!["jane@localhost"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(extract_emails("").is_empty());
        assert!(extract_emails("@handle and user@ and @@").is_empty());
    }
}
