use std::time::Instant;

use crate::answer::{AnswerStyle, GenealogyWebsite};
use crate::ui::app::App;
use crate::ui::assistant::{AssistantState, FormField, FormState};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_column, layout_regions};
use crate::ui::markdown::render_answer;
use crate::ui::theme::{
    ACCENT_GREEN, ACTIVE_HIGHLIGHT, BRAND_GREEN, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT,
    STATUS_ERROR,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const BODY_MAX_WIDTH: u16 = 96;

pub const WELCOME_TITLE: &str = "Welcome to Your Genealogy Assistant";
pub const WELCOME_TEXT: &str = "Ready to uncover your family's story? Ask a question about popular genealogy sites, and I'll provide you with a detailed explanation or a simple step-by-step guide.";
pub const QUESTION_PLACEHOLDER: &str =
    "e.g., How do I find birth records for an ancestor in the 1800s?";
pub const SUBMIT_LABEL: &str = "Ask My Question";
pub const LOADING_LABEL: &str = "Getting Answer...";
pub const RESPONSE_TITLE: &str = "Here's your answer:";

pub fn draw(frame: &mut Frame<'_>, app: &mut App, now: Instant) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new().widget(), header);
    frame.render_widget(Clear, body);
    let column = centered_column(body, BODY_MAX_WIDTH);

    match app.state() {
        AssistantState::Welcome => draw_welcome(frame, column),
        AssistantState::Form { form } => draw_form(frame, column, form, false),
        AssistantState::Loading { form } => draw_form(frame, column, form, true),
        AssistantState::Response { .. } => draw_response(frame, column, app),
    }

    let hints = footer_hints(app, now);
    let footer_widget = Footer::new(&hints, app.status());
    frame.render_widget(footer_widget.widget(footer), footer);
}

/// Key hints for the current screen.
pub fn footer_hints(app: &App, now: Instant) -> String {
    match app.state() {
        AssistantState::Welcome => "Enter: Get Started │ Ctrl+Q: Quit".to_string(),
        AssistantState::Form { .. } => {
            "Tab: Next field │ ↑/↓: Select │ Ctrl+S: Ask │ Ctrl+U: Clear │ Ctrl+Q: Quit".to_string()
        }
        AssistantState::Loading { .. } => format!("{LOADING_LABEL} │ Ctrl+Q: Quit"),
        AssistantState::Response {
            streaming: true, ..
        } => "Receiving answer... │ ↑/↓: Scroll │ Ctrl+Q: Quit".to_string(),
        AssistantState::Response { .. } => {
            let copy = if app.copy_acknowledged(now) {
                "Copied!"
            } else {
                "c: Copy"
            };
            format!("{copy} │ C: Copy source │ p: Print │ n: Ask Another Question │ ↑/↓: Scroll")
        }
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(BRAND_GREEN).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

fn draw_welcome(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            WELCOME_TITLE,
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(WELCOME_TEXT, Style::default().fg(HEADER_TEXT))),
        Line::from(""),
        Line::from(Span::styled(
            "[ Get Started ]",
            Style::default().fg(ACCENT_GREEN).add_modifier(Modifier::BOLD),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel("Welcome"));
    frame.render_widget(widget, area);
}

fn draw_form(frame: &mut Frame<'_>, area: Rect, form: &FormState, loading: bool) {
    let mut lines = Vec::new();

    lines.push(field_label("1. Select a Website", form, FormField::Website));
    lines.push(radio_line(
        GenealogyWebsite::ALL.iter().map(|site| (site.label(), *site == form.website)),
    ));
    lines.push(Line::from(""));

    lines.push(field_label("2. Choose an Answer Style", form, FormField::Style));
    lines.push(radio_line(
        AnswerStyle::ALL.iter().map(|style| (style.label(), *style == form.style)),
    ));
    lines.push(Line::from(""));

    lines.push(field_label("3. What is your question?", form, FormField::Question));
    if form.question.is_empty() {
        lines.push(Line::from(Span::styled(
            QUESTION_PLACEHOLDER,
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC),
        )));
    } else {
        let text_style = Style::default().fg(HEADER_TEXT);
        let mut question_lines: Vec<Line> = form
            .question
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), text_style)))
            .collect();
        if form.focused == FormField::Question && !loading {
            if let Some(last) = question_lines.last_mut() {
                last.spans.push(Span::styled("▏", Style::default().fg(ACCENT_GREEN)));
            }
        }
        lines.extend(question_lines);
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    }
    lines.push(Line::from(""));

    let label = if loading { LOADING_LABEL } else { SUBMIT_LABEL };
    let mut button_style = Style::default().fg(ACCENT_GREEN).add_modifier(Modifier::BOLD);
    if loading {
        button_style = Style::default().fg(MUTED_TEXT);
    } else if form.focused == FormField::Submit {
        button_style = button_style.bg(ACTIVE_HIGHLIGHT);
    }
    lines.push(Line::from(Span::styled(format!("[ {label} ]"), button_style)));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Ask a Question"));
    frame.render_widget(widget, area);
}

fn field_label(text: &str, form: &FormState, field: FormField) -> Line<'static> {
    let mut style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD);
    if form.focused == field {
        style = style.bg(ACTIVE_HIGHLIGHT);
    }
    let marker = if form.focused == field { "▸ " } else { "  " };
    Line::from(Span::styled(format!("{marker}{text}"), style))
}

fn radio_line<'a>(options: impl Iterator<Item = (&'a str, bool)>) -> Line<'static> {
    let mut spans = vec![Span::raw("    ")];
    for (label, selected) in options {
        let (mark, style) = if selected {
            ("(•) ", Style::default().fg(ACCENT_GREEN).add_modifier(Modifier::BOLD))
        } else {
            ("( ) ", Style::default().fg(HEADER_TEXT))
        };
        spans.push(Span::styled(format!("{mark}{label}"), style));
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

fn draw_response(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let (response, streaming) = match app.state() {
        AssistantState::Response {
            response,
            streaming,
            ..
        } => (response.clone(), *streaming),
        _ => return,
    };

    let mut lines = render_answer(&response, Style::default().fg(HEADER_TEXT));
    if streaming {
        lines.push(Line::from(Span::styled(
            "▌",
            Style::default().fg(ACCENT_GREEN),
        )));
    }

    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2).max(1);
    let total = wrapped_height(&lines, inner_width);
    app.clamp_scroll(total, inner_height);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(), 0))
        .block(panel(RESPONSE_TITLE));
    frame.render_widget(widget, area);
}

/// Rows the lines occupy once wrapped to `width`.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    rows.min(usize::from(u16::MAX)) as u16
}
