use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::clipboard::CopyMode;
use crate::ui::app::App;
use crate::ui::assistant::{AssistantIntent, AssistantState, FormField};

/// Lines moved by PageUp/PageDown.
const PAGE_LINES: u16 = 10;

/// Side effect the runtime must perform after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// No further action needed (handled internally).
    None,
    /// Start the answer request for the current draft.
    Submit,
    Copy(CopyMode),
    Print,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return InputAction::None;
    }

    match app.state() {
        AssistantState::Welcome => handle_welcome_key(app, key),
        AssistantState::Form { form } => {
            let focused = form.focused;
            handle_form_key(app, key, focused)
        }
        AssistantState::Loading { .. } => InputAction::None,
        AssistantState::Response { streaming, .. } => {
            let streaming = *streaming;
            handle_response_key(app, key, streaming)
        }
    }
}

pub fn handle_paste(app: &mut App, text: String) {
    if matches!(app.state(), AssistantState::Form { .. }) {
        app.edit(AssistantIntent::InsertText(text));
    }
}

fn handle_welcome_key(app: &mut App, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.start(),
        KeyCode::Esc => app.request_quit(),
        _ => {}
    }
    InputAction::None
}

fn handle_form_key(app: &mut App, key: KeyEvent, focused: FormField) -> InputAction {
    if is_ctrl_char(key, 's') {
        return InputAction::Submit;
    }
    if is_ctrl_char(key, 'u') {
        app.edit(AssistantIntent::ClearQuestion);
        return InputAction::None;
    }

    match key.code {
        KeyCode::Tab => app.edit(AssistantIntent::NextField),
        KeyCode::BackTab => app.edit(AssistantIntent::PrevField),
        KeyCode::Esc => app.request_quit(),
        KeyCode::Enter => match focused {
            FormField::Submit => return InputAction::Submit,
            FormField::Question => app.edit(AssistantIntent::InsertChar('\n')),
            FormField::Website | FormField::Style => app.edit(AssistantIntent::NextField),
        },
        KeyCode::Up | KeyCode::Left if is_selection(focused) => {
            app.edit(AssistantIntent::SelectPrev)
        }
        KeyCode::Down | KeyCode::Right if is_selection(focused) => {
            app.edit(AssistantIntent::SelectNext)
        }
        KeyCode::Char(' ') if focused == FormField::Submit => return InputAction::Submit,
        KeyCode::Char(ch) if focused == FormField::Question && !has_command_modifier(key) => {
            app.edit(AssistantIntent::InsertChar(ch))
        }
        KeyCode::Backspace => app.edit(AssistantIntent::Backspace),
        _ => {}
    }
    InputAction::None
}

fn handle_response_key(app: &mut App, key: KeyEvent, streaming: bool) -> InputAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE_LINES),
        KeyCode::PageDown => app.scroll_down(PAGE_LINES),
        KeyCode::Home => app.scroll_up(u16::MAX),
        _ if streaming => {}
        KeyCode::Char('c') => return InputAction::Copy(CopyMode::PlainText),
        KeyCode::Char('C') => return InputAction::Copy(CopyMode::Source),
        KeyCode::Char('p') => return InputAction::Print,
        KeyCode::Char('n') | KeyCode::Enter => app.reset(),
        KeyCode::Esc => app.request_quit(),
        _ => {}
    }
    InputAction::None
}

fn is_selection(field: FormField) -> bool {
    matches!(field, FormField::Website | FormField::Style)
}

/// Ctrl and Alt chords are shortcuts, never text.
fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
