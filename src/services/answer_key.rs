use serde_json::Value;
use thiserror::Error;

use crate::models::domain::Answer;
use crate::models::dto::generated_quiz::GeneratedAnswer;

/// Why a question has no usable answer key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerKeyError {
    #[error("no answer is marked correct")]
    NoCorrectAnswer,

    #[error("{count} answers are marked correct, expected exactly one")]
    MultipleCorrectAnswers { count: usize },
}

/// Anything that can say whether it is flagged as the correct answer.
pub trait AnswerRecord {
    fn is_marked_correct(&self) -> bool;
}

/// `true` or the integer `1`. Strings, other numbers and null are not correct.
pub fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_u64() == Some(1),
        _ => false,
    }
}

impl AnswerRecord for GeneratedAnswer {
    fn is_marked_correct(&self) -> bool {
        self.correct.as_ref().is_some_and(is_truthy_flag)
            || self.is_correct.as_ref().is_some_and(is_truthy_flag)
    }
}

impl AnswerRecord for Answer {
    fn is_marked_correct(&self) -> bool {
        self.is_correct
    }
}

/// Returns the single answer marked correct.
///
/// Never falls back to a default: zero or several flagged answers make the
/// question unusable and the caller decides whether to reject or skip it.
pub fn resolve_correct_answer<A: AnswerRecord>(answers: &[A]) -> Result<&A, AnswerKeyError> {
    correct_answer_index(answers).map(|index| &answers[index])
}

/// Position (0-based) of the single correct answer.
pub fn correct_answer_index<A: AnswerRecord>(answers: &[A]) -> Result<usize, AnswerKeyError> {
    let mut flagged = answers
        .iter()
        .enumerate()
        .filter(|(_, answer)| answer.is_marked_correct())
        .map(|(index, _)| index);

    match (flagged.next(), flagged.count()) {
        (None, _) => Err(AnswerKeyError::NoCorrectAnswer),
        (Some(index), 0) => Ok(index),
        (Some(_), rest) => Err(AnswerKeyError::MultipleCorrectAnswers { count: rest + 1 }),
    }
}
