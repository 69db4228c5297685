use crate::ui::mvi::UiState;

use super::form::FormState;

/// Which screen the assistant shows. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssistantState {
    #[default]
    Welcome,
    Form {
        form: FormState,
    },
    /// Submitted, no fragment received yet.
    Loading {
        form: FormState,
    },
    Response {
        form: FormState,
        /// Accumulated answer text, cleaned once the stream finishes.
        response: String,
        error: Option<String>,
        /// True until `Finished` or `Failed` arrives.
        streaming: bool,
    },
}

impl UiState for AssistantState {}

impl AssistantState {
    pub fn form(&self) -> Option<&FormState> {
        match self {
            Self::Welcome => None,
            Self::Form { form } | Self::Loading { form } | Self::Response { form, .. } => {
                Some(form)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// True while an answer is outstanding (loading or streaming).
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Loading { .. } | Self::Response { streaming: true, .. }
        )
    }

    pub fn response(&self) -> Option<&str> {
        match self {
            Self::Response { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Response { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}
