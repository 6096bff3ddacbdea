//! Lexicons: static reference tables used to classify extracted text.
//!
//! Loaded once at startup (bundled or from `LEXICON_DIR`), wrapped in `Arc`,
//! and shared read-only by every parse. Nothing here is mutated after load.

pub mod names;
pub mod sections;
pub mod skills;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::LexiconError;

pub use names::NameGenderLists;
pub use sections::SectionAliasTable;
pub use skills::SkillSynonymMap;

const BUNDLED_MALE_NAMES: &str = include_str!("../../resources/male_names.txt");
const BUNDLED_FEMALE_NAMES: &str = include_str!("../../resources/female_names.txt");
const BUNDLED_COURSES: &str = include_str!("../../resources/courses.txt");
const BUNDLED_SKILLS: &str = include_str!("../../resources/skills.json");

pub const MALE_NAMES_FILE: &str = "male_names.txt";
pub const FEMALE_NAMES_FILE: &str = "female_names.txt";
pub const COURSES_FILE: &str = "courses.txt";
pub const SKILLS_FILE: &str = "skills.json";

/// Flat list of degree/course fragments, matched as case-sensitive substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseCorpus {
    fragments: Vec<String>,
}

impl CourseCorpus {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_lines(content: &str) -> Self {
        Self::new(parse_lines(content))
    }

    /// Every fragment contained in `line`, in corpus order.
    pub fn matches<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fragments
            .iter()
            .map(String::as_str)
            .filter(move |fragment| line.contains(*fragment))
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// All reference data a parse needs.
#[derive(Debug, Clone)]
pub struct Lexicons {
    pub sections: SectionAliasTable,
    pub skills: SkillSynonymMap,
    pub courses: CourseCorpus,
    pub names: NameGenderLists,
}

impl Lexicons {
    /// Lexicons compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            sections: SectionAliasTable::default(),
            // Bundled JSON is checked by `test_builtin_lexicons_load`.
            skills: SkillSynonymMap::from_json(BUNDLED_SKILLS).unwrap_or_default(),
            courses: CourseCorpus::from_lines(BUNDLED_COURSES),
            names: NameGenderLists::from_lines(BUNDLED_MALE_NAMES, BUNDLED_FEMALE_NAMES),
        }
    }

    /// Reads the four lexicon files from `dir`. The section alias table is
    /// not file-backed and keeps its default.
    pub fn from_dir(dir: &Path) -> Result<Self, LexiconError> {
        let male = read_lexicon_file(&dir.join(MALE_NAMES_FILE))?;
        let female = read_lexicon_file(&dir.join(FEMALE_NAMES_FILE))?;
        let courses = read_lexicon_file(&dir.join(COURSES_FILE))?;

        let skills_path = dir.join(SKILLS_FILE);
        let skills_raw = read_lexicon_file(&skills_path)?;
        let skills = SkillSynonymMap::from_json(&skills_raw)
            .map_err(|e| LexiconError::Json(skills_path.clone(), e))?;
        if skills.is_empty() {
            return Err(LexiconError::Empty(skills_path));
        }

        let lexicons = Self {
            sections: SectionAliasTable::default(),
            skills,
            courses: CourseCorpus::from_lines(&courses),
            names: NameGenderLists::from_lines(&male, &female),
        };
        info!(
            "Loaded lexicons from {}: {} skills, {} course fragments, {} given names",
            dir.display(),
            lexicons.skills.len(),
            lexicons.courses.len(),
            lexicons.names.len()
        );
        Ok(lexicons)
    }

    /// Swaps the section alias table, e.g. for localized headers.
    pub fn with_sections(mut self, sections: SectionAliasTable) -> Self {
        self.sections = sections;
        self
    }
}

impl Default for Lexicons {
    fn default() -> Self {
        Self::builtin()
    }
}

fn read_lexicon_file(path: &Path) -> Result<String, LexiconError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| LexiconError::Io(PathBuf::from(path), e))?;
    if parse_lines(&content).next().is_none() {
        return Err(LexiconError::Empty(PathBuf::from(path)));
    }
    Ok(content)
}

/// Entries of a line-oriented lexicon file: trimmed, no blanks, no `#` comments.
pub(crate) fn parse_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
