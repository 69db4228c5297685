use crate::ui::app::StatusMessage;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DISCLAIMER: &str = "Powered by AI. Please verify important information.";

pub struct Footer<'a> {
    hints: &'a str,
    status: Option<&'a StatusMessage>,
}

impl<'a> Footer<'a> {
    pub fn new(hints: &'a str, status: Option<&'a StatusMessage>) -> Self {
        Self { hints, status }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let (left, left_style) = match self.status {
            Some(status) => {
                let color = if status.is_error { STATUS_ERROR } else { STATUS_OK };
                (format!(" {}", status.text), Style::default().fg(color))
            }
            None => (format!(" {}", self.hints), text_style),
        };
        let version = format!("v{VERSION} ");

        // Calculate padding using char count, not byte count (for Unicode)
        let content_width = area.width.saturating_sub(2) as usize; // minus borders
        let padding = content_width
            .saturating_sub(left.chars().count())
            .saturating_sub(version.chars().count());

        let first = Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);
        let second = Line::from(Span::styled(DISCLAIMER, text_style)).alignment(Alignment::Center);
        let line = vec![first, second];

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
