//! Question request model and form validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum question length, counted in characters after trimming.
pub const MIN_QUESTION_CHARS: usize = 10;

/// Genealogy services the assistant knows how to answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenealogyWebsite {
    #[default]
    Ancestry,
    FamilySearch,
    MyHeritage,
    Findmypast,
    TwentyThreeAndMe,
}

impl GenealogyWebsite {
    pub const ALL: [GenealogyWebsite; 5] = [
        GenealogyWebsite::Ancestry,
        GenealogyWebsite::FamilySearch,
        GenealogyWebsite::MyHeritage,
        GenealogyWebsite::Findmypast,
        GenealogyWebsite::TwentyThreeAndMe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GenealogyWebsite::Ancestry => "Ancestry.com",
            GenealogyWebsite::FamilySearch => "FamilySearch.org",
            GenealogyWebsite::MyHeritage => "MyHeritage.com",
            GenealogyWebsite::Findmypast => "Findmypast.com",
            GenealogyWebsite::TwentyThreeAndMe => "23andMe",
        }
    }

    /// Parse a CLI/config name. Accepts the kebab-case id or the display label.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|site| {
            site.label().to_lowercase() == needle || site.id() == needle
        })
    }

    fn id(self) -> &'static str {
        match self {
            GenealogyWebsite::Ancestry => "ancestry",
            GenealogyWebsite::FamilySearch => "family-search",
            GenealogyWebsite::MyHeritage => "my-heritage",
            GenealogyWebsite::Findmypast => "findmypast",
            GenealogyWebsite::TwentyThreeAndMe => "twenty-three-and-me",
        }
    }
}

impl fmt::Display for GenealogyWebsite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the answer should be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerStyle {
    Detailed,
    #[default]
    StepByStep,
}

impl AnswerStyle {
    pub const ALL: [AnswerStyle; 2] = [AnswerStyle::Detailed, AnswerStyle::StepByStep];

    pub fn label(self) -> &'static str {
        match self {
            AnswerStyle::Detailed => "Detailed Explanation",
            AnswerStyle::StepByStep => "Step-by-step",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "detailed" | "detailed explanation" => Some(AnswerStyle::Detailed),
            "step-by-step" | "steps" => Some(AnswerStyle::StepByStep),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form-level rejection. Never reaches the answer client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a more detailed question (at least {min} characters).")]
    QuestionTooShort { min: usize, actual: usize },
}

pub fn validate_question(text: &str) -> Result<(), ValidationError> {
    let actual = text.trim().chars().count();
    if actual < MIN_QUESTION_CHARS {
        return Err(ValidationError::QuestionTooShort {
            min: MIN_QUESTION_CHARS,
            actual,
        });
    }
    Ok(())
}

/// A submitted question. Only constructible through [`QuestionRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    website: GenealogyWebsite,
    style: AnswerStyle,
    question: String,
}

impl QuestionRequest {
    pub fn new(
        website: GenealogyWebsite,
        style: AnswerStyle,
        question: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let question = question.into();
        validate_question(&question)?;
        Ok(Self {
            website,
            style,
            question,
        })
    }

    pub fn website(&self) -> GenealogyWebsite {
        self.website
    }

    pub fn style(&self) -> AnswerStyle {
        self.style
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}
