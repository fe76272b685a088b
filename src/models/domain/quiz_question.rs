use async_graphql::Enum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub points: i32, // always >= 1, unused by grading (equal weight per question)
    pub order_index: i32,
    pub kind: QuestionKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
    pub order_index: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    /// Parses the type names emitted by generators and forms: `multiple_choice`,
    /// `mcq`, `qcm`, `true_false`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "multiple_choice" | "mcq" | "qcm" => Some(QuestionType::MultipleChoice),
            "true_false" | "truefalse" | "vrai_faux" => Some(QuestionType::TrueFalse),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
        }
    }
}

/// Answer arity violations for a question type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArityError {
    #[error("true/false question needs exactly 2 answers, found {0}")]
    TrueFalse(usize),

    #[error("multiple choice question needs at least 2 answers, found {0}")]
    MultipleChoice(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", content = "answers", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice(Vec<Answer>),
    TrueFalse(Vec<Answer>),
}

impl QuestionKind {
    /// Builds the variant for `question_type`, rejecting answer lists whose
    /// length the type does not allow.
    pub fn new(question_type: QuestionType, answers: Vec<Answer>) -> Result<Self, ArityError> {
        match question_type {
            QuestionType::TrueFalse if answers.len() != 2 => {
                Err(ArityError::TrueFalse(answers.len()))
            }
            QuestionType::TrueFalse => Ok(QuestionKind::TrueFalse(answers)),
            QuestionType::MultipleChoice if answers.len() < 2 => {
                Err(ArityError::MultipleChoice(answers.len()))
            }
            QuestionType::MultipleChoice => Ok(QuestionKind::MultipleChoice(answers)),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::MultipleChoice(_) => QuestionType::MultipleChoice,
            QuestionKind::TrueFalse(_) => QuestionType::TrueFalse,
        }
    }

    pub fn answers(&self) -> &[Answer] {
        match self {
            QuestionKind::MultipleChoice(answers) | QuestionKind::TrueFalse(answers) => answers,
        }
    }
}

impl Question {
    pub fn answers(&self) -> &[Answer] {
        self.kind.answers()
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }
}
