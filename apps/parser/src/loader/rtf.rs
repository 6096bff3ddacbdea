//! Minimal RTF-to-plain-text conversion.
//!
//! Handles the subset resumes actually use: paragraph/line control words,
//! `\'hh` escapes in the Windows-1252 code page, `\uN` Unicode escapes with
//! their `\ucN` fallback characters, and ignorable destinations.

use encoding_rs::WINDOWS_1252;

use super::{trim_leading_whitespace, DocumentFormat, DocumentLoader};
use crate::errors::DocumentLoadError;

/// Destinations whose content is never document text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "headerl",
    "headerr",
    "headerf",
    "footer",
    "footerl",
    "footerr",
    "footerf",
    "object",
    "fldinst",
    "themedata",
    "colorschememapping",
    "latentstyles",
    "datastore",
    "xmlnstbl",
    "listtable",
    "listoverridetable",
    "rsidtbl",
    "generator",
];

pub struct RtfLoader;

impl DocumentLoader for RtfLoader {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentLoadError> {
        let bytes = trim_leading_whitespace(bytes);
        if !bytes.starts_with(b"{\\rtf") {
            return Err(corrupt("missing {\\rtf header"));
        }
        RtfReader::new(bytes).read()
    }
}

#[derive(Debug, Clone, Copy)]
struct GroupState {
    skip: bool,
    /// Fallback characters following each `\uN`.
    uc: usize,
}

struct RtfReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: GroupState,
    stack: Vec<GroupState>,
    /// Fallback characters still to drop after a `\uN`.
    pending_skip: usize,
    out: String,
}

impl<'a> RtfReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            state: GroupState { skip: false, uc: 1 },
            stack: Vec::new(),
            pending_skip: 0,
            out: String::new(),
        }
    }

    fn read(mut self) -> Result<String, DocumentLoadError> {
        while let Some(&b) = self.bytes.get(self.pos) {
            self.pos += 1;
            match b {
                b'{' => {
                    self.stack.push(self.state);
                    self.pending_skip = 0;
                }
                b'}' => {
                    self.state = self
                        .stack
                        .pop()
                        .ok_or_else(|| corrupt("unbalanced closing brace"))?;
                    if self.stack.is_empty() {
                        return Ok(self.out);
                    }
                }
                b'\\' => self.control()?,
                b'\r' | b'\n' => {}
                _ => self.emit_byte(b),
            }
        }
        Err(corrupt("unterminated group"))
    }

    fn control(&mut self) -> Result<(), DocumentLoadError> {
        let Some(&c) = self.bytes.get(self.pos) else {
            return Err(corrupt("dangling backslash"));
        };
        self.pos += 1;

        match c {
            b'\\' | b'{' | b'}' => self.emit_byte(c),
            b'*' => self.state.skip = true,
            b'\'' => {
                let hex = self
                    .bytes
                    .get(self.pos..self.pos + 2)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| corrupt("invalid \\' escape"))?;
                self.pos += 2;
                self.emit_byte(hex);
            }
            b'~' => self.emit_char(' '),
            b'_' => self.emit_char('-'),
            b'\r' | b'\n' => self.emit_char('\n'),
            c if c.is_ascii_alphabetic() => {
                self.pos -= 1;
                let (word, param) = self.control_word();
                self.apply_word(&word, param);
            }
            _ => {}
        }
        Ok(())
    }

    fn control_word(&mut self) -> (String, Option<i32>) {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
            self.pos += 1;
        }
        let word = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();

        let num_start = self.pos;
        if self.bytes.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        let param = std::str::from_utf8(&self.bytes[num_start..self.pos])
            .ok()
            .and_then(|n| n.parse::<i32>().ok());

        // A single space delimits the control word and is not text.
        if self.bytes.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }
        (word, param)
    }

    fn apply_word(&mut self, word: &str, param: Option<i32>) {
        match word {
            "par" | "line" | "sect" | "page" | "row" => self.emit_char('\n'),
            "tab" | "cell" => self.emit_char(' '),
            "emdash" | "endash" => self.emit_char('-'),
            "bullet" => self.emit_char('*'),
            "lquote" | "rquote" => self.emit_char('\''),
            "ldblquote" | "rdblquote" => self.emit_char('"'),
            "uc" => self.state.uc = param.unwrap_or(1).max(0) as usize,
            "u" => {
                if let Some(code) = param {
                    // Negative values encode code points above 32767.
                    let code = if code < 0 { code + 65536 } else { code };
                    if let Some(ch) = u32::try_from(code).ok().and_then(char::from_u32) {
                        self.emit_char(ch);
                    }
                    self.pending_skip = self.state.uc;
                }
            }
            w if SKIPPED_DESTINATIONS.contains(&w) => self.state.skip = true,
            _ => {}
        }
    }

    fn emit_byte(&mut self, b: u8) {
        if self.pending_skip > 0 {
            self.pending_skip -= 1;
            return;
        }
        if b.is_ascii() {
            self.emit_char(b as char);
        } else {
            let buf = [b];
            let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(&buf);
            if !self.state.skip {
                self.out.push_str(&decoded);
            }
        }
    }

    fn emit_char(&mut self, c: char) {
        if !self.state.skip {
            self.out.push(c);
        }
    }
}

fn corrupt(reason: &str) -> DocumentLoadError {
    DocumentLoadError::Corrupt(DocumentFormat::Rtf, reason.to_string())
}
