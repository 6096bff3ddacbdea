use std::io::{Cursor, Read};

use roxmltree::{Document, Node};
use zip::ZipArchive;

use super::{DocumentFormat, DocumentLoader};
use crate::errors::DocumentLoadError;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

/// Reads `word/document.xml` and emits one line per paragraph.
pub struct DocxLoader;

impl DocumentLoader for DocxLoader {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentLoadError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(corrupt)?;
        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(corrupt)?
            .read_to_string(&mut xml)
            .map_err(corrupt)?;
        paragraphs_to_text(&xml)
    }
}

fn paragraphs_to_text(xml: &str) -> Result<String, DocumentLoadError> {
    let doc = Document::parse(xml).map_err(corrupt)?;
    let lines: Vec<String> = doc
        .descendants()
        .filter(|n| n.has_tag_name((W_NS, "p")))
        .map(paragraph_text)
        .collect();
    Ok(lines.join("\n"))
}

/// Text of one paragraph. Runs of nested paragraphs (text boxes) are left
/// to their own paragraph so nothing is emitted twice.
fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    for node in paragraph.descendants().filter(|n| n.is_element()) {
        if owning_paragraph(node) != Some(paragraph) {
            continue;
        }
        match node.tag_name().name() {
            "t" if node.tag_name().namespace() == Some(W_NS) => {
                text.push_str(node.text().unwrap_or_default());
            }
            "tab" => text.push(' '),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn owning_paragraph<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.ancestors().skip(1).find(|a| a.has_tag_name((W_NS, "p")))
}

fn corrupt(e: impl std::fmt::Display) -> DocumentLoadError {
    DocumentLoadError::Corrupt(DocumentFormat::Docx, e.to_string())
}
