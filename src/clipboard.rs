//! Clipboard access and text extraction for copying answers.

use arboard::Clipboard;
use scraper::{ElementRef, Html, Node};

/// Elements that start on a new line in extracted text.
const LINE_ELEMENTS: &[&str] = &["br", "div", "li", "tr", "section"];

/// Elements followed by a blank line in extracted text.
const PARAGRAPH_ELEMENTS: &[&str] = &[
    "p", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "table",
];

/// What to put on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Rendered text with markup removed.
    PlainText,
    /// The answer exactly as received (HTML or Markdown source).
    Source,
}

/// Handler for clipboard operations.
pub struct ClipboardHandler {
    clipboard: Clipboard,
}

impl ClipboardHandler {
    pub fn new() -> Result<Self, String> {
        let clipboard =
            Clipboard::new().map_err(|e| format!("Clipboard unavailable: {}", e))?;
        Ok(Self { clipboard })
    }

    /// Write text to the system clipboard.
    pub fn set_text(&mut self, text: &str) -> Result<(), String> {
        self.clipboard
            .set_text(text.to_string())
            .map_err(|e| format!("Failed to set clipboard text: {}", e))
    }
}

/// Text to copy for `response` in the given mode.
pub fn copy_text(response: &str, mode: CopyMode) -> String {
    match mode {
        CopyMode::PlainText if looks_like_html(response) => plain_text(response),
        CopyMode::PlainText | CopyMode::Source => response.to_string(),
    }
}

/// True when the text starts with a tag.
pub fn looks_like_html(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with('<') && text.contains('>')
}

/// Strip tags from an HTML fragment, keeping one line per block element.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    collect_text(fragment.root_element(), &mut out);

    let lines: Vec<&str> = out.lines().map(str::trim).collect();
    let mut text = String::new();
    let mut blank_run = false;
    for line in lines {
        if line.is_empty() {
            blank_run = !text.is_empty();
            continue;
        }
        if blank_run {
            text.push('\n');
            blank_run = false;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
    }
    text
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    let is_line = LINE_ELEMENTS.contains(&name);
    let is_paragraph = PARAGRAPH_ELEMENTS.contains(&name);
    if is_line || is_paragraph {
        ensure_newline(out);
    }
    if name == "li" {
        out.push_str("• ");
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    if is_line || is_paragraph {
        ensure_newline(out);
    }
    if is_paragraph {
        out.push('\n');
    }
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
