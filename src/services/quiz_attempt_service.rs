use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Quiz, Submission},
    models::dto::response::AttemptResult,
    repositories::{QuizAttemptRepository, QuizRepository},
    services::grading_service::{GradingEngine, GradingOutcome},
    services::score_reconciler::ScoreReconciler,
};

pub struct QuizAttemptService {
    quiz_repo: Arc<dyn QuizRepository>,
    attempt_repo: Arc<dyn QuizAttemptRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quiz_repo: Arc<dyn QuizRepository>,
        attempt_repo: Arc<dyn QuizAttemptRepository>,
    ) -> Self {
        Self {
            quiz_repo,
            attempt_repo,
        }
    }

    async fn load_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quiz_repo
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))
    }

    /// Grades a student's submission and records the attempt.
    pub async fn submit(
        &self,
        student_id: &str,
        quiz_id: &str,
        submission: Submission,
    ) -> AppResult<GradingOutcome> {
        let quiz = self.load_quiz(quiz_id).await?;
        let outcome = GradingEngine::grade(&quiz, &submission)?;

        let attempt = outcome
            .clone()
            .into_attempt(student_id, &quiz.id, submission);
        let attempt_id = self.attempt_repo.save(attempt).await?;

        log::info!(
            "Student {} scored {}/{} on quiz {} (attempt {})",
            student_id,
            outcome.raw_correct_count,
            outcome.total_questions,
            quiz.id,
            attempt_id
        );

        Ok(outcome)
    }

    /// Grades without recording anything. Lets the owning teacher try a quiz.
    pub async fn preview(
        &self,
        teacher_id: &str,
        quiz_id: &str,
        submission: Submission,
    ) -> AppResult<GradingOutcome> {
        let quiz = self.load_quiz(quiz_id).await?;
        if !quiz.is_owned_by(teacher_id) {
            return Err(AppError::Forbidden(
                "Only the teacher who created this quiz can preview it".to_string(),
            ));
        }

        Ok(GradingEngine::grade(&quiz, &submission)?)
    }

    /// Every attempt of a student, newest first, with display scores
    /// reconciled against the quiz's current question count.
    pub async fn results_for_student(&self, student_id: &str) -> AppResult<Vec<AttemptResult>> {
        let mut attempts = self.attempt_repo.find_by_student(student_id).await?;
        if attempts.is_empty() {
            return Ok(Vec::new());
        }

        let mut quiz_ids: Vec<String> = attempts.iter().map(|a| a.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();

        let quizzes: HashMap<String, Quiz> = self
            .quiz_repo
            .find_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();

        attempts.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let results = attempts
            .into_iter()
            .map(|attempt| {
                let (quiz_name, total) = match quizzes.get(&attempt.quiz_id) {
                    Some(quiz) => (quiz.name.clone(), quiz.total_questions() as i32),
                    None => {
                        log::warn!(
                            "Attempt {} references missing quiz {}",
                            attempt.id,
                            attempt.quiz_id
                        );
                        (String::new(), 0)
                    }
                };
                let score = ScoreReconciler::reconcile_attempt(&attempt, total);
                AttemptResult::new(attempt, quiz_name, score)
            })
            .collect();

        Ok(results)
    }
}
