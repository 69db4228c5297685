//! Answer text to ratatui lines.
//!
//! Markdown is rendered with pulldown-cmark. HTML answers are reduced to
//! their text first.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::clipboard::{looks_like_html, plain_text};
use crate::ui::theme::{ACCENT_GREEN, MUTED_TEXT};

/// Render an answer for display.
pub fn render_answer(content: &str, base_style: Style) -> Vec<Line<'static>> {
    if looks_like_html(content) {
        return plain_text(content)
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), base_style)))
            .collect();
    }
    MarkdownRenderer::new(base_style).render(content)
}

struct MarkdownRenderer {
    base_style: Style,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,

    // Counters, so `# Heading with **bold**` stays bold after the inner tag ends.
    bold_count: usize,
    italic_count: usize,

    in_code_block: bool,
    list_stack: Vec<Option<u64>>,
}

impl MarkdownRenderer {
    fn new(base_style: Style) -> Self {
        Self {
            base_style,
            lines: Vec::new(),
            current_spans: Vec::new(),
            bold_count: 0,
            italic_count: 0,
            in_code_block: false,
            list_stack: Vec::new(),
        }
    }

    fn render(mut self, content: &str) -> Vec<Line<'static>> {
        let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH);
        for event in parser {
            self.handle_event(event);
        }
        self.flush_line();
        self.lines
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.handle_text(&text),
            Event::Code(code) => {
                let style = self.base_style.fg(ACCENT_GREEN);
                self.current_spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak => self.current_spans.push(Span::raw(" ")),
            Event::HardBreak => self.flush_line(),
            Event::Html(html) | Event::InlineHtml(html) => self.handle_text(&html),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { .. } | Tag::Strong => self.bold_count += 1,
            Tag::Emphasis => self.italic_count += 1,
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Tag::Item => {
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(idx)) => {
                        let m = format!("{indent}{idx}. ");
                        *idx += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.current_spans.push(Span::styled(marker, self.base_style));
            }
            Tag::Paragraph => {
                if !self.lines.is_empty() && self.list_stack.is_empty() {
                    self.lines.push(Line::from(""));
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.bold_count = self.bold_count.saturating_sub(1);
                self.flush_line();
            }
            TagEnd::Strong => self.bold_count = self.bold_count.saturating_sub(1),
            TagEnd::Emphasis => self.italic_count = self.italic_count.saturating_sub(1),
            TagEnd::CodeBlock => self.in_code_block = false,
            TagEnd::List(_) => {
                self.list_stack.pop();
            }
            TagEnd::Item | TagEnd::Paragraph => self.flush_line(),
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        if self.in_code_block {
            let style = self.base_style.fg(MUTED_TEXT);
            for line in text.lines() {
                self.lines
                    .push(Line::from(Span::styled(format!("  {line}"), style)));
            }
            return;
        }
        let style = self.current_style();
        self.current_spans.push(Span::styled(text.to_string(), style));
    }

    fn current_style(&self) -> Style {
        let mut style = self.base_style;
        if self.bold_count > 0 {
            style = style.fg(ACCENT_GREEN).add_modifier(Modifier::BOLD);
        }
        if self.italic_count > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn flush_line(&mut self) {
        if !self.current_spans.is_empty() {
            let spans = std::mem::take(&mut self.current_spans);
            self.lines.push(Line::from(spans));
        }
    }
}
