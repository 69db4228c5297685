//! Intents for the assistant view.

use crate::answer::AnswerEvent;
use crate::ui::mvi::Intent;

use super::form::FormDefaults;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantIntent {
    /// Leave the welcome screen for a fresh form.
    Start(FormDefaults),

    NextField,
    PrevField,
    /// Move the radio selection of the focused list down.
    SelectNext,
    /// Move the radio selection of the focused list up.
    SelectPrev,
    InsertChar(char),
    /// Pasted text, appended to the question.
    InsertText(String),
    Backspace,
    ClearQuestion,

    /// Validate the draft and start waiting for an answer.
    Submit,

    /// One more piece of the answer.
    Fragment(String),
    /// The answer stream is exhausted.
    Finished,
    /// The request failed; carries the display message.
    Failed(String),

    /// Ask another question. Ignored while an answer is streaming.
    Reset(FormDefaults),
}

impl Intent for AssistantIntent {}

impl From<AnswerEvent> for AssistantIntent {
    fn from(event: AnswerEvent) -> Self {
        match event {
            AnswerEvent::Fragment(text) => AssistantIntent::Fragment(text),
            AnswerEvent::Finished => AssistantIntent::Finished,
            AnswerEvent::Failed(message) => AssistantIntent::Failed(message),
        }
    }
}
