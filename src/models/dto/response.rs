use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::quiz_attempt::QuestionOutcome;
use crate::models::domain::{QuestionType, Quiz, QuizAttempt};
use crate::services::score_reconciler::{GradeBand, ReconciledScore};

/// A quiz as shown to a student: no answer key.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizForTaking {
    pub id: String,
    pub name: String,
    pub theme: String,
    pub max_score: i32,
    pub questions: Vec<QuestionForTaking>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionForTaking {
    pub id: String,
    pub text: String,
    pub question_type: QuestionType,
    pub order_index: i32,
    pub answers: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub order_index: i32,
}

impl From<Quiz> for QuizForTaking {
    fn from(quiz: Quiz) -> Self {
        let mut questions: Vec<QuestionForTaking> = quiz
            .questions
            .into_iter()
            .map(|question| {
                let question_type = question.question_type();
                let mut answers: Vec<AnswerOption> = question
                    .answers()
                    .iter()
                    .map(|a| AnswerOption {
                        id: a.id.clone(),
                        text: a.text.clone(),
                        order_index: a.order_index,
                    })
                    .collect();
                answers.sort_by_key(|a| a.order_index);

                QuestionForTaking {
                    id: question.id,
                    text: question.text,
                    question_type,
                    order_index: question.order_index,
                    answers,
                }
            })
            .collect();
        questions.sort_by_key(|q| q.order_index);

        QuizForTaking {
            id: quiz.id,
            name: quiz.name,
            theme: quiz.theme,
            max_score: quiz.max_score,
            questions,
        }
    }
}

/// One row of a student's results page.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub attempt_id: String,
    pub quiz_id: String,
    pub quiz_name: String,
    pub submitted_at: DateTime<Utc>,
    pub display_score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub grade_band: GradeBand,
    pub grade_label: String,
    pub breakdown: Vec<QuestionOutcome>,
}

impl AttemptResult {
    pub fn new(attempt: QuizAttempt, quiz_name: String, score: ReconciledScore) -> Self {
        AttemptResult {
            attempt_id: attempt.id,
            quiz_id: attempt.quiz_id,
            quiz_name,
            submitted_at: attempt.submitted_at,
            display_score: score.display_score,
            total_questions: score.total_questions,
            percentage: score.percentage,
            grade_band: score.grade_band,
            grade_label: score.grade_band.label().to_string(),
            breakdown: attempt.breakdown,
        }
    }
}
