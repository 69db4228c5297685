//! Printable HTML export of an answer.
//!
//! The answer is wrapped in a standalone document that asks the browser to
//! print itself once loaded, then handed to the platform opener.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pulldown_cmark::{html, Options, Parser};
use thiserror::Error;
use uuid::Uuid;

use crate::clipboard::looks_like_html;

/// Delay before the print dialog opens, in milliseconds.
pub const PRINT_DELAY_MS: u64 = 250;

pub const PRINT_TITLE: &str = "Print Genealogy Answer";

const BASE_STYLES: &str = "<style>\
body { color: #1c1917; line-height: 1.6; max-width: 48rem; margin: 0 auto; }\
#page-header { text-align: center; }\
#page-header h2 { font-size: 2.5rem; letter-spacing: 0.05em; margin: 0 0 0.5rem; }\
#page-header h1 { font-size: 2rem; color: #065f46; margin: 0; }\
#page-header a { color: #047857; }\
#printable-area h2 { border-bottom: 1px solid #e7e5e4; padding-bottom: 0.5rem; }\
strong { color: #047857; }\
</style>";

const PRINT_STYLES: &str = "<style>\
body { background-color: white !important; padding: 2rem; font-family: \"Old Standard TT\", serif; }\
#page-header { margin-bottom: 2rem; border-bottom: 2px solid #d6d3d1; padding-bottom: 1.5rem; }\
</style>";

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Failed to write print document '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open '{path}' with {command}: {source}")]
    Launch {
        command: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A standalone HTML page ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    html: String,
}

impl PrintDocument {
    pub fn build(header_html: &str, content_html: &str, styles: &str) -> Self {
        let html = format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{PRINT_TITLE}</title>\n\
             {styles}\n\
             {PRINT_STYLES}\n\
             </head>\n\
             <body>\n\
             {header_html}\n\
             {content_html}\n\
             <script>\n\
             window.addEventListener('load', function () {{\n\
               setTimeout(function () {{ window.focus(); window.print(); }}, {PRINT_DELAY_MS});\n\
             }});\n\
             </script>\n\
             </body>\n\
             </html>\n"
        );
        Self { html }
    }

    /// Document for a finished answer with the standard header.
    pub fn for_answer(answer: &str) -> Self {
        Self::build(&header_html(), &content_html(answer), BASE_STYLES)
    }

    pub fn as_html(&self) -> &str {
        &self.html
    }

    pub fn write_to(&self, path: &Path) -> Result<(), PrintError> {
        fs::write(path, &self.html).map_err(|source| PrintError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn header_html() -> String {
    "<div id=\"page-header\">\
     <h2>LiahonaBooks</h2>\
     <h1>Genealogy AI Assistant</h1>\
     <p>Your personal guide to family history research.</p>\
     <a href=\"http://www.liahonabooks.com\">www.liahonabooks.com</a>\
     </div>"
        .to_string()
}

pub fn content_html(answer: &str) -> String {
    format!(
        "<div id=\"printable-area\"><h2>Here's your answer:</h2><div class=\"answer\">{}</div></div>",
        answer_html(answer)
    )
}

/// HTML answers pass through; anything else is rendered as Markdown.
pub fn answer_html(answer: &str) -> String {
    if looks_like_html(answer) {
        return answer.to_string();
    }
    let parser = Parser::new_ext(answer, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Write the answer's print document to the temp dir and open it.
pub fn print_answer(answer: &str) -> Result<PathBuf, PrintError> {
    let path = std::env::temp_dir().join(format!("genealogy-answer-{}.html", Uuid::new_v4()));
    PrintDocument::for_answer(answer).write_to(&path)?;
    open_in_browser(&path)?;
    tracing::info!(path = %path.display(), "Print document opened");
    Ok(path)
}

fn open_in_browser(path: &Path) -> Result<(), PrintError> {
    let mut command = opener_command(path);
    let program = format!("{:?}", command.get_program());
    // The opener must not write over the TUI.
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|source| PrintError::Launch {
            command: program,
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_header_content_and_delayed_print() {
        let doc = PrintDocument::build("<div id=\"page-header\">H</div>", "<p>C</p>", "<style>x</style>");
        let html = doc.as_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Print Genealogy Answer</title>"));
        assert!(html.contains("<style>x</style>"));
        assert!(html.contains("#page-header { margin-bottom: 2rem;"));
        assert!(html.contains("setTimeout(function () { window.focus(); window.print(); }, 250);"));

        let header = html.find("id=\"page-header\"").unwrap();
        let content = html.find("<p>C</p>").unwrap();
        assert!(header < content);
    }

    #[test]
    fn markdown_answers_are_rendered() {
        let html = answer_html("**Step 1:** Visit the archive.");
        assert_eq!(html.trim(), "<p><strong>Step 1:</strong> Visit the archive.</p>");
    }

    #[test]
    fn html_answers_pass_through() {
        assert_eq!(answer_html("<p>Hi</p>"), "<p>Hi</p>");
    }

    #[test]
    fn answer_document_wraps_printable_area() {
        let doc = PrintDocument::for_answer("<p>Hi</p>");
        assert!(doc.as_html().contains(
            "<div id=\"printable-area\"><h2>Here's your answer:</h2><div class=\"answer\"><p>Hi</p></div></div>"
        ));
        assert!(doc.as_html().contains("www.liahonabooks.com"));
    }

    #[test]
    fn write_to_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("doc.html");
        let err = PrintDocument::for_answer("x").write_to(&path).unwrap_err();
        assert!(matches!(err, PrintError::Write { .. }));
        assert!(err.to_string().contains("doc.html"));
    }
}
