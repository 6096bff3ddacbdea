use std::collections::{BTreeMap, HashMap};

/// Canonical skill → alias list, with a case-insensitive reverse index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillSynonymMap {
    canonical: BTreeMap<String, Vec<String>>,
    index: HashMap<String, String>,
}

impl SkillSynonymMap {
    /// Parses `{ "Canonical": ["alias", ...], ... }`.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let canonical: BTreeMap<String, Vec<String>> = serde_json::from_str(raw)?;
        Ok(Self::from_map(canonical))
    }

    pub fn from_map(canonical: BTreeMap<String, Vec<String>>) -> Self {
        let mut index = HashMap::new();
        // Aliases first so a canonical name always wins over a colliding alias.
        for (name, aliases) in &canonical {
            for alias in aliases {
                index.entry(lookup_key(alias)).or_insert_with(|| name.clone());
            }
        }
        for name in canonical.keys() {
            index.insert(lookup_key(name), name.clone());
        }
        index.remove("");
        Self { canonical, index }
    }

    /// Canonical name for a token equal to a canonical name or alias.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.index.get(&lookup_key(token)).map(String::as_str)
    }

    pub fn aliases(&self, canonical: &str) -> Option<&[String]> {
        self.canonical.get(canonical).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

fn lookup_key(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
