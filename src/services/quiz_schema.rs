use std::collections::HashSet;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::domain::quiz_question::ArityError;
use crate::models::domain::{Answer, Question, QuestionKind, QuestionType, Quiz};
use crate::models::dto::generated_quiz::{GeneratedQuestion, GeneratedQuiz};
use crate::services::answer_key::{resolve_correct_answer, AnswerKeyError, AnswerRecord};

/// Structural problems in a generated (or edited) quiz. Question and answer
/// positions are 1-based, in the order received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizSchemaError {
    #[error("generated quiz does not have the expected shape: {0}")]
    Malformed(String),

    #[error("generated quiz has no questions")]
    NoQuestions,

    #[error("question {question}: text is missing")]
    MissingQuestionText { question: usize },

    #[error("question {question}: unknown type '{value}'")]
    UnknownQuestionType { question: usize, value: String },

    #[error("question {question}, answer {answer}: text is missing")]
    MissingAnswerText { question: usize, answer: usize },

    #[error("question {question}: answer id '{id}' is used more than once")]
    DuplicateAnswerId { question: usize, id: String },

    #[error("question {question}: {source}")]
    Arity { question: usize, source: ArityError },

    #[error("question {question}: {source}")]
    AnswerKey { question: usize, source: AnswerKeyError },
}

/// What the caller knows about the quiz being generated.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub fallback_title: String,
    pub theme: String,
    pub requested_type: QuestionType,
    pub requested_count: Option<usize>,
    pub max_score: i32,
    pub course_id: Option<String>,
    pub created_by_user_id: Option<String>,
}

/// A question before ids and order are assigned.
#[derive(Debug, Clone)]
pub struct DraftQuestion {
    pub text: Option<String>,
    pub points: i32,
    pub question_type: QuestionType,
    pub answers: Vec<DraftAnswer>,
}

#[derive(Debug, Clone)]
pub struct DraftAnswer {
    pub id: Option<String>,
    pub text: Option<String>,
    pub is_correct: bool,
}

pub struct QuizSchemaValidator;

impl QuizSchemaValidator {
    /// Turns raw generator output into a complete quiz, or names the first
    /// violation. All-or-nothing: one bad question rejects the whole quiz.
    pub fn validate(raw: Value, ctx: &GenerationContext) -> Result<Quiz, QuizSchemaError> {
        if !raw.is_object() {
            return Err(QuizSchemaError::Malformed(
                "expected a JSON object at the top level".to_string(),
            ));
        }

        let generated: GeneratedQuiz = serde_json::from_value(raw)
            .map_err(|e| QuizSchemaError::Malformed(e.to_string()))?;

        Self::validate_generated(generated, ctx)
    }

    pub fn validate_generated(
        generated: GeneratedQuiz,
        ctx: &GenerationContext,
    ) -> Result<Quiz, QuizSchemaError> {
        if let Some(requested) = ctx.requested_count {
            if requested != generated.questions.len() {
                log::info!(
                    "Generator returned {} questions, {} were requested",
                    generated.questions.len(),
                    requested
                );
            }
        }

        let drafts = generated
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| draft_from_generated(i + 1, q, ctx.requested_type))
            .collect::<Result<Vec<_>, _>>()?;

        let questions = Self::validate_questions(drafts).inspect_err(|e| {
            log::warn!("Rejecting generated quiz '{}': {}", ctx.fallback_title, e);
        })?;

        let name = generated
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| ctx.fallback_title.clone());

        let now = Utc::now();
        Ok(Quiz {
            id: Uuid::new_v4().to_string(),
            name,
            theme: ctx.theme.clone(),
            max_score: ctx.max_score,
            created_by_user_id: ctx.created_by_user_id.clone(),
            course_id: ctx.course_id.clone(),
            questions,
            created_at: Some(now),
            modified_at: Some(now),
        })
    }

    /// Checks every draft and assigns ids and 1-based order indices in the
    /// order received. Shared by generation and teacher edits.
    pub fn validate_questions(drafts: Vec<DraftQuestion>) -> Result<Vec<Question>, QuizSchemaError> {
        if drafts.is_empty() {
            return Err(QuizSchemaError::NoQuestions);
        }

        drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| assemble_question(i + 1, draft))
            .collect()
    }
}

fn draft_from_generated(
    position: usize,
    question: GeneratedQuestion,
    requested_type: QuestionType,
) -> Result<DraftQuestion, QuizSchemaError> {
    let question_type = match question.question_type.as_deref().map(str::trim) {
        None | Some("") => requested_type,
        Some(value) => QuestionType::parse(value).ok_or_else(|| {
            QuizSchemaError::UnknownQuestionType {
                question: position,
                value: value.to_string(),
            }
        })?,
    };

    let answers = question
        .answers
        .iter()
        .map(|answer| DraftAnswer {
            id: None,
            text: answer.text.clone(),
            is_correct: answer.is_marked_correct(),
        })
        .collect();

    Ok(DraftQuestion {
        text: question.text,
        points: points_or_default(question.points.as_ref()),
        question_type,
        answers,
    })
}

/// Positive integer points, otherwise 1.
fn points_or_default(points: Option<&Value>) -> i32 {
    let parsed = match points {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed
        .filter(|p| *p >= 1)
        .and_then(|p| i32::try_from(p).ok())
        .unwrap_or(1)
}

fn assemble_question(position: usize, draft: DraftQuestion) -> Result<Question, QuizSchemaError> {
    let text = draft
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(QuizSchemaError::MissingQuestionText { question: position })?
        .to_string();

    if let Some(missing) = draft
        .answers
        .iter()
        .position(|a| a.text.as_deref().map(str::trim).unwrap_or_default().is_empty())
    {
        return Err(QuizSchemaError::MissingAnswerText {
            question: position,
            answer: missing + 1,
        });
    }

    let answers: Vec<Answer> = draft
        .answers
        .into_iter()
        .enumerate()
        .map(|(i, a)| Answer {
            id: a
                .id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            text: a.text.unwrap_or_default().trim().to_string(),
            is_correct: a.is_correct,
            order_index: (i + 1) as i32,
        })
        .collect();

    let duplicate = {
        let mut seen = HashSet::with_capacity(answers.len());
        answers
            .iter()
            .find(|a| !seen.insert(a.id.as_str()))
            .map(|a| a.id.clone())
    };
    if let Some(id) = duplicate {
        return Err(QuizSchemaError::DuplicateAnswerId {
            question: position,
            id,
        });
    }

    let kind = QuestionKind::new(draft.question_type, answers).map_err(|source| {
        QuizSchemaError::Arity {
            question: position,
            source,
        }
    })?;

    resolve_correct_answer(kind.answers()).map_err(|source| QuizSchemaError::AnswerKey {
        question: position,
        source,
    })?;

    Ok(Question {
        id: Uuid::new_v4().to_string(),
        text,
        points: draft.points.max(1),
        order_index: position as i32,
        kind,
    })
}
