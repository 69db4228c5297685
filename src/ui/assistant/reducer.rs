//! Reducer for the assistant view.

use crate::answer::{clean_response, failure_payload};
use crate::ui::mvi::Reducer;

use super::form::{FormField, FormState};
use super::intent::AssistantIntent;
use super::state::AssistantState;

/// Pure state transitions for the assistant view.
///
/// Starting the request itself is the caller's job: after `Submit` lands in
/// `Loading`, the caller builds the request from the form.
pub struct AssistantReducer;

impl Reducer for AssistantReducer {
    type State = AssistantState;
    type Intent = AssistantIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AssistantIntent::Start(defaults) => match state {
                AssistantState::Welcome => AssistantState::Form {
                    form: FormState::new(defaults),
                },
                other => other,
            },

            AssistantIntent::Submit => match state {
                AssistantState::Form { mut form } => match form.to_request() {
                    Ok(_) => {
                        form.error = None;
                        AssistantState::Loading { form }
                    }
                    Err(err) => {
                        form.error = Some(err.to_string());
                        AssistantState::Form { form }
                    }
                },
                other => other,
            },

            AssistantIntent::Fragment(text) => match state {
                AssistantState::Loading { form } => AssistantState::Response {
                    form,
                    response: text,
                    error: None,
                    streaming: true,
                },
                AssistantState::Response {
                    form,
                    mut response,
                    error,
                    streaming: true,
                } => {
                    response.push_str(&text);
                    AssistantState::Response {
                        form,
                        response,
                        error,
                        streaming: true,
                    }
                }
                other => other,
            },

            AssistantIntent::Finished => match state {
                AssistantState::Loading { form } => AssistantState::Response {
                    form,
                    response: clean_response(""),
                    error: None,
                    streaming: false,
                },
                AssistantState::Response {
                    form,
                    response,
                    error,
                    streaming: true,
                } => AssistantState::Response {
                    form,
                    response: clean_response(&response),
                    error,
                    streaming: false,
                },
                other => other,
            },

            AssistantIntent::Failed(message) => match state {
                AssistantState::Loading { form }
                | AssistantState::Response {
                    form,
                    streaming: true,
                    ..
                } => AssistantState::Response {
                    form,
                    response: failure_payload(&message),
                    error: Some(message),
                    streaming: false,
                },
                other => other,
            },

            AssistantIntent::Reset(defaults) => match state {
                AssistantState::Response {
                    streaming: false, ..
                } => AssistantState::Form {
                    form: FormState::new(defaults),
                },
                other => other,
            },

            edit => match state {
                AssistantState::Form { mut form } => {
                    apply_edit(&mut form, edit);
                    AssistantState::Form { form }
                }
                other => other,
            },
        }
    }
}

fn apply_edit(form: &mut FormState, intent: AssistantIntent) {
    match intent {
        AssistantIntent::NextField => form.focused = form.focused.next(),
        AssistantIntent::PrevField => form.focused = form.focused.prev(),
        AssistantIntent::SelectNext => form.cycle_selection(1),
        AssistantIntent::SelectPrev => form.cycle_selection(-1),
        AssistantIntent::InsertChar(ch) if form.focused == FormField::Question => {
            form.question.push(ch);
        }
        AssistantIntent::InsertText(text) => {
            form.focused = FormField::Question;
            form.question.push_str(&text);
        }
        AssistantIntent::Backspace if form.focused == FormField::Question => {
            form.question.pop();
        }
        AssistantIntent::ClearQuestion => form.question.clear(),
        _ => {}
    }
}
