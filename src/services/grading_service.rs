use async_graphql::SimpleObject;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::domain::quiz_attempt::{QuestionOutcome, StoredScore};
use crate::models::domain::{Quiz, QuizAttempt, Submission};
use crate::services::answer_key::resolve_correct_answer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    #[error("quiz '{quiz_id}' has no question with a usable answer key")]
    NoScorableQuestions { quiz_id: String },
}

/// Result of grading one submission. `total_questions` counts only the
/// questions that could be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct GradingOutcome {
    pub raw_correct_count: i32,
    pub total_questions: i32,
    pub normalized_score: i32,
    pub max_score: i32,
    pub per_question_breakdown: Vec<QuestionOutcome>,
    pub unscored_question_ids: Vec<String>,
}

/// `round(numerator / denominator)` with halves rounded up, for non-negative
/// inputs. A zero denominator yields 0.
pub fn round_half_up_div(numerator: i64, denominator: i64) -> i64 {
    if denominator <= 0 || numerator <= 0 {
        return 0;
    }
    (2 * numerator + denominator) / (2 * denominator)
}

pub struct GradingEngine;

impl GradingEngine {
    /// Grades `submission` against `quiz`.
    ///
    /// Unanswered questions are incorrect. Questions whose answer key is
    /// ambiguous are left out of both the count and the total. Fails only when
    /// a non-empty quiz has no scorable question at all.
    pub fn grade(quiz: &Quiz, submission: &Submission) -> Result<GradingOutcome, GradingError> {
        let max_score = quiz.max_score.max(0);

        if quiz.questions.is_empty() {
            return Ok(GradingOutcome {
                raw_correct_count: 0,
                total_questions: 0,
                normalized_score: 0,
                max_score,
                per_question_breakdown: Vec::new(),
                unscored_question_ids: Vec::new(),
            });
        }

        let mut breakdown = Vec::with_capacity(quiz.questions.len());
        let mut unscored = Vec::new();

        for question in &quiz.questions {
            let correct = match resolve_correct_answer(question.answers()) {
                Ok(answer) => answer,
                Err(e) => {
                    log::warn!(
                        "Question '{}' of quiz '{}' left unscored: {}",
                        question.id,
                        quiz.id,
                        e
                    );
                    unscored.push(question.id.clone());
                    continue;
                }
            };

            let selected = submission.selection_for(&question.id);
            let is_correct = selected.is_some_and(|id| id == correct.id.trim());

            breakdown.push(QuestionOutcome {
                question_id: question.id.clone(),
                is_correct,
                selected_answer_id: selected.map(str::to_string),
            });
        }

        if breakdown.is_empty() {
            return Err(GradingError::NoScorableQuestions {
                quiz_id: quiz.id.clone(),
            });
        }

        let total = breakdown.len() as i64;
        let correct = breakdown.iter().filter(|o| o.is_correct).count() as i64;
        let normalized = round_half_up_div(correct * i64::from(max_score), total);

        Ok(GradingOutcome {
            raw_correct_count: correct as i32,
            total_questions: total as i32,
            normalized_score: normalized as i32,
            max_score,
            per_question_breakdown: breakdown,
            unscored_question_ids: unscored,
        })
    }
}

impl GradingOutcome {
    /// The attempt to persist. Always stores the raw correct count; scaling to
    /// `max_score` happens when results are displayed.
    pub fn into_attempt(self, student_id: &str, quiz_id: &str, submission: Submission) -> QuizAttempt {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            quiz_id: quiz_id.to_string(),
            submitted_answers: submission,
            score: StoredScore::RawCorrectCount(self.raw_correct_count),
            total_questions: Some(self.total_questions),
            breakdown: self.per_question_breakdown,
            submitted_at: Utc::now(),
        }
    }
}
