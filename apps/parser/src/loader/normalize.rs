use std::fmt;

/// Document text after transliteration and whitespace folding.
/// Lines are `\n`-separated; blank lines are kept so line structure survives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Folds diacritics to ASCII, unifies line breaks, drops control
    /// characters, and collapses every non-newline whitespace run to one space.
    pub fn normalize(raw: &str) -> Self {
        let unified: String = raw
            .replace("\r\n", "\n")
            .chars()
            .map(|c| match c {
                '\r' | '\u{0b}' | '\u{0c}' | '\u{2028}' | '\u{2029}' => '\n',
                _ => c,
            })
            .filter(|c| *c == '\n' || *c == '\t' || !c.is_control())
            .collect();

        // deunicode drops `\n` and `\t` once a line holds any non-ASCII char,
        // so transliterate after splitting.
        let lines: Vec<String> = unified
            .split('\n')
            .map(|line| {
                let line = line.replace('\t', " ");
                let ascii = deunicode::deunicode_with_tofu(&line, "");
                ascii.split_whitespace().collect::<Vec<_>>().join(" ")
            })
            .collect();

        let end = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |i| i + 1);

        Self(lines[..end].join("\n"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn lines(&self) -> std::str::Lines<'_> {
        self.0.lines()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
