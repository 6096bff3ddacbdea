use crate::segmenter::SectionKind;

/// Canonical section kinds with their header aliases, in match priority order.
const DEFAULT_ALIASES: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Education,
        &["education", "academic", "qualification"],
    ),
    (
        SectionKind::Skills,
        &["skill", "expertise", "technologies", "competencies", "proficiencies"],
    ),
    (
        SectionKind::Experience,
        &["experience", "employment", "work history", "career history"],
    ),
    (SectionKind::Projects, &["project"]),
    (
        SectionKind::Summary,
        &["summary", "objective", "about me", "career profile", "personal profile"],
    ),
    (
        SectionKind::Certifications,
        &["certification", "certificate", "licenses", "accreditation"],
    ),
];

/// Ordered mapping from canonical kind to lowercase alias substrings.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAliasTable {
    entries: Vec<(SectionKind, Vec<String>)>,
}

impl SectionAliasTable {
    /// Builds a table from `(kind, aliases)` pairs. Order is match priority.
    pub fn new<I, A, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (SectionKind, A)>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(kind, aliases)| {
                    let aliases = aliases
                        .into_iter()
                        .map(|a| a.as_ref().trim().to_lowercase())
                        .filter(|a| !a.is_empty())
                        .collect();
                    (kind, aliases)
                })
                .collect(),
        }
    }

    /// First kind with an alias occurring (case-insensitively) in `line`.
    pub fn match_section(&self, line: &str) -> Option<SectionKind> {
        let line = line.to_lowercase();
        self.entries
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| line.contains(alias.as_str())))
            .map(|(kind, _)| *kind)
    }

    pub fn aliases(&self, kind: SectionKind) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, aliases)| aliases.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for SectionAliasTable {
    fn default() -> Self {
        Self::new(DEFAULT_ALIASES.iter().map(|(kind, aliases)| (*kind, aliases.iter())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let table = SectionAliasTable::default();
        assert_eq!(table.match_section("TECHNICAL SKILLS"), Some(SectionKind::Skills));
        assert_eq!(table.match_section("Professional Experience"), Some(SectionKind::Experience));
        assert_eq!(table.match_section("Career Objective"), Some(SectionKind::Summary));
        assert_eq!(table.match_section("Python, Go"), None);
    }

    #[test]
    fn test_dictionary_order_breaks_ties() {
        let table = SectionAliasTable::default();
        // Both education and skills aliases occur; education comes first.
        assert_eq!(
            table.match_section("Education & Skills"),
            Some(SectionKind::Education)
        );
    }

    #[test]
    fn test_custom_table_replaces_defaults() {
        let table = SectionAliasTable::new([
            (SectionKind::Experience, vec!["Berufserfahrung"]),
            (SectionKind::Education, vec!["Ausbildung"]),
        ]);
        assert_eq!(table.match_section("BERUFSERFAHRUNG"), Some(SectionKind::Experience));
        assert_eq!(table.match_section("Education"), None);
        assert_eq!(table.aliases(SectionKind::Education), &["ausbildung".to_string()]);
        assert!(table.aliases(SectionKind::Projects).is_empty());
    }
}
