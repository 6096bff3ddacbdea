use std::collections::HashSet;

use super::parse_lines;

/// Two sets of lowercased given names. Membership is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameGenderLists {
    male: HashSet<String>,
    female: HashSet<String>,
}

impl NameGenderLists {
    /// Each line may carry several space-separated variants; every one of
    /// them becomes a member.
    pub fn from_lines(male: &str, female: &str) -> Self {
        Self {
            male: collect_names(male),
            female: collect_names(female),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        let token = token
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        !token.is_empty() && (self.male.contains(&token) || self.female.contains(&token))
    }

    pub fn len(&self) -> usize {
        self.male.len() + self.female.len()
    }

    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }
}

fn collect_names(content: &str) -> HashSet<String> {
    parse_lines(content)
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect()
}
