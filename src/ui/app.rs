use std::time::{Duration, Instant};

use crate::answer::{AnswerEvent, QuestionRequest};
use crate::clipboard::{copy_text, CopyMode};
use crate::config::UiConfig;
use crate::ui::assistant::{AssistantIntent, AssistantReducer, AssistantState, FormDefaults};
use crate::ui::mvi::Reducer;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// One-line message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    should_quit: bool,
    assistant: AssistantState,
    defaults: FormDefaults,
    /// Set when a request is handed to the runtime, cleared by its terminal event.
    in_flight: bool,
    scroll: u16,
    copy_ack: Duration,
    copied_until: Option<Instant>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            should_quit: false,
            assistant: AssistantState::default(),
            defaults: FormDefaults {
                website: ui.default_website,
                style: ui.default_style,
            },
            in_flight: false,
            scroll: 0,
            copy_ack: Duration::from_millis(ui.copy_ack_ms),
            copied_until: None,
            status: None,
        }
    }

    pub fn state(&self) -> &AssistantState {
        &self.assistant
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    /// Clamp scroll so the last line stays reachable.
    pub fn clamp_scroll(&mut self, content_lines: u16, viewport: u16) {
        let max = content_lines.saturating_sub(viewport);
        self.scroll = self.scroll.min(max);
    }

    pub fn start(&mut self) {
        self.dispatch(AssistantIntent::Start(self.defaults));
    }

    /// Form editing intents. Submit, stream and reset intents have their
    /// own entry points.
    pub fn edit(&mut self, intent: AssistantIntent) {
        self.dispatch(intent);
    }

    /// Validate the draft and return the request to run, if any.
    ///
    /// Returns `None` when validation fails or an answer is already in flight.
    pub fn submit(&mut self) -> Option<QuestionRequest> {
        if self.in_flight {
            tracing::warn!("Submit ignored: an answer is already in flight");
            return None;
        }
        if !matches!(self.assistant, AssistantState::Form { .. }) {
            return None;
        }

        self.dispatch(AssistantIntent::Submit);
        let AssistantState::Loading { form } = &self.assistant else {
            tracing::debug!("Submit rejected by validation");
            return None;
        };
        match form.to_request() {
            Ok(request) => {
                self.in_flight = true;
                self.scroll = 0;
                self.status = None;
                Some(request)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Loading state holds an invalid draft");
                None
            }
        }
    }

    pub fn on_answer_event(&mut self, event: AnswerEvent) {
        if matches!(event, AnswerEvent::Finished | AnswerEvent::Failed(_)) {
            self.in_flight = false;
        }
        self.dispatch(event.into());
    }

    /// Ask another question. Ignored while an answer is outstanding.
    pub fn reset(&mut self) {
        if self.in_flight {
            return;
        }
        self.dispatch(AssistantIntent::Reset(self.defaults));
        self.scroll = 0;
        self.copied_until = None;
        self.status = None;
    }

    /// Text to place on the clipboard, once the answer is complete.
    pub fn copy_payload(&self, mode: CopyMode) -> Option<String> {
        match &self.assistant {
            AssistantState::Response {
                response,
                streaming: false,
                ..
            } => Some(copy_text(response, mode)),
            _ => None,
        }
    }

    /// Answer to print, once complete.
    pub fn printable(&self) -> Option<&str> {
        match &self.assistant {
            AssistantState::Response {
                response,
                streaming: false,
                ..
            } => Some(response),
            _ => None,
        }
    }

    pub fn on_copy_result(&mut self, result: Result<(), String>, now: Instant) {
        match result {
            Ok(()) => {
                self.copied_until = Some(now + self.copy_ack);
                self.status = None;
            }
            Err(message) => {
                tracing::error!(error = %message, "Copy failed");
                self.copied_until = None;
                self.set_status(message, true);
            }
        }
    }

    /// True while "Copied!" should be shown.
    pub fn copy_acknowledged(&self, now: Instant) -> bool {
        self.copied_until.is_some_and(|until| now < until)
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.copied_until.is_some_and(|until| now >= until) {
            self.copied_until = None;
        }
    }

    fn dispatch(&mut self, intent: AssistantIntent) {
        dispatch_mvi!(self, assistant, AssistantReducer, intent);
    }
}
