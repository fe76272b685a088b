use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
    models::dto::request::UpdateQuestionsRequest,
    models::dto::response::QuizForTaking,
    repositories::QuizRepository,
    services::quiz_schema::{DraftQuestion, QuizSchemaValidator},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    /// Full quiz, answer key included. Only the owning teacher may read it.
    pub async fn get_quiz_for_owner(&self, id: &str, teacher_id: &str) -> AppResult<Quiz> {
        let quiz = self.get_quiz(id).await?;
        if !quiz.is_owned_by(teacher_id) {
            return Err(AppError::Forbidden(
                "Only the teacher who created this quiz can view its answer key".to_string(),
            ));
        }
        Ok(quiz)
    }

    pub async fn get_quiz_for_taking(&self, id: &str) -> AppResult<QuizForTaking> {
        let quiz = self.get_quiz(id).await?;
        Ok(QuizForTaking::from(quiz))
    }

    /// Replaces every question of a quiz. The new set goes through the same
    /// checks as generated output, so an edit cannot break the answer key.
    pub async fn replace_questions(
        &self,
        id: &str,
        teacher_id: &str,
        request: UpdateQuestionsRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = self.get_quiz_for_owner(id, teacher_id).await?;

        let drafts: Vec<DraftQuestion> = request.questions.into_iter().map(Into::into).collect();
        quiz.questions = QuizSchemaValidator::validate_questions(drafts)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        quiz.modified_at = Some(Utc::now());

        log::info!(
            "Teacher {} replaced questions of quiz {} ({} questions)",
            teacher_id,
            quiz.id,
            quiz.total_questions()
        );

        self.repository.update(quiz).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuestionType;
    use crate::models::dto::request::{AnswerInput, QuestionInput};
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::test_utils::fixtures::sample_quiz;

    fn repo_with(quiz: Quiz) -> MockQuizRepository {
        let mut repo = MockQuizRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(quiz.clone())));
        repo
    }

    fn true_false_input(correct_count: usize) -> QuestionInput {
        QuestionInput {
            text: "L'eau bout à 100°C au niveau de la mer.".to_string(),
            points: None,
            question_type: QuestionType::TrueFalse,
            answers: vec![
                AnswerInput {
                    id: None,
                    text: "Vrai".to_string(),
                    is_correct: correct_count >= 1,
                },
                AnswerInput {
                    id: None,
                    text: "Faux".to_string(),
                    is_correct: correct_count >= 2,
                },
            ],
        }
    }

    #[tokio::test]
    async fn missing_quiz_is_not_found() {
        let mut repo = MockQuizRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = QuizService::new(Arc::new(repo));
        let err = service.get_quiz("nope").await.expect_err("should fail");

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn other_teacher_cannot_edit() {
        let mut repo = repo_with(sample_quiz(2));
        repo.expect_update().times(0);

        let service = QuizService::new(Arc::new(repo));
        let err = service
            .replace_questions(
                "quiz-1",
                "someone-else",
                UpdateQuestionsRequest {
                    questions: vec![true_false_input(1)],
                },
            )
            .await
            .expect_err("should fail");

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn owner_edit_is_revalidated() {
        let mut repo = repo_with(sample_quiz(2));
        repo.expect_update().times(0);

        let service = QuizService::new(Arc::new(repo));
        let err = service
            .replace_questions(
                "quiz-1",
                "teacher-1",
                UpdateQuestionsRequest {
                    questions: vec![true_false_input(2)],
                },
            )
            .await
            .expect_err("two correct answers should be rejected");

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn owner_edit_replaces_questions() {
        let mut repo = repo_with(sample_quiz(3));
        repo.expect_update().times(1).returning(|quiz| Ok(quiz));

        let service = QuizService::new(Arc::new(repo));
        let quiz = service
            .replace_questions(
                "quiz-1",
                "teacher-1",
                UpdateQuestionsRequest {
                    questions: vec![true_false_input(1)],
                },
            )
            .await
            .expect("edit should succeed");

        assert_eq!(quiz.total_questions(), 1);
        assert_eq!(quiz.questions[0].question_type(), QuestionType::TrueFalse);
        assert_eq!(quiz.questions[0].order_index, 1);
    }
}
