//! Question form draft.

use crate::answer::{AnswerStyle, GenealogyWebsite, QuestionRequest, ValidationError};

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    Website,
    Style,
    #[default]
    Question,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Website,
        FormField::Style,
        FormField::Question,
        FormField::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Preselected values for a fresh form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormDefaults {
    pub website: GenealogyWebsite,
    pub style: AnswerStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub website: GenealogyWebsite,
    pub style: AnswerStyle,
    pub question: String,
    pub focused: FormField,
    /// Validation message from the last rejected submit.
    pub error: Option<String>,
}

impl FormState {
    pub fn new(defaults: FormDefaults) -> Self {
        Self {
            website: defaults.website,
            style: defaults.style,
            ..Self::default()
        }
    }

    pub fn to_request(&self) -> Result<QuestionRequest, ValidationError> {
        QuestionRequest::new(self.website, self.style, self.question.clone())
    }

    /// Move the radio selection of the focused list by `step`.
    pub(super) fn cycle_selection(&mut self, step: isize) {
        match self.focused {
            FormField::Website => {
                self.website = cycle(&GenealogyWebsite::ALL, self.website, step);
            }
            FormField::Style => {
                self.style = cycle(&AnswerStyle::ALL, self.style, step);
            }
            FormField::Question | FormField::Submit => {}
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(index + step).rem_euclid(len) as usize]
}
