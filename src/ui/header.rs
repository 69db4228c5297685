use crate::ui::theme::{ACCENT_GREEN, BRAND_GREEN, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub const BRAND: &str = "LiahonaBooks";
pub const TITLE: &str = "Genealogy AI Assistant";
pub const TAGLINE: &str = "Your personal guide to family history research.";
pub const WEBSITE: &str = "www.liahonabooks.com";

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let title_line = Line::from(vec![
            Span::styled(
                BRAND,
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(
                TITLE,
                Style::default().fg(BRAND_GREEN).add_modifier(Modifier::BOLD),
            ),
        ]);
        let tagline = Line::from(vec![
            Span::styled(TAGLINE, Style::default().fg(HEADER_TEXT)),
            Span::styled("  ", separator_style),
            Span::styled(WEBSITE, Style::default().fg(ACCENT_GREEN)),
        ]);

        Paragraph::new(vec![title_line, tagline])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP | Borders::BOTTOM)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
