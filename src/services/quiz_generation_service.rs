use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use crate::{
    errors::AppResult,
    models::domain::{quiz::DEFAULT_MAX_SCORE, QuestionType, Quiz},
    models::dto::request::GenerateQuizRequest,
    repositories::QuizRepository,
    services::media_extraction::{ExtractionError, MediaExtractor},
    services::quiz_generator::{GenerationProviderError, QuizGenerator},
    services::quiz_schema::{GenerationContext, QuizSchemaError, QuizSchemaValidator},
};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Provider(#[from] GenerationProviderError),

    #[error(transparent)]
    Schema(#[from] QuizSchemaError),
}

/// Media in, persisted quiz out. Nothing is stored unless the generated
/// quiz passes validation in full.
pub struct QuizGenerationService {
    quiz_repo: Arc<dyn QuizRepository>,
    extractor: Arc<dyn MediaExtractor>,
    generator: Arc<dyn QuizGenerator>,
}

impl QuizGenerationService {
    pub fn new(
        quiz_repo: Arc<dyn QuizRepository>,
        extractor: Arc<dyn MediaExtractor>,
        generator: Arc<dyn QuizGenerator>,
    ) -> Self {
        Self {
            quiz_repo,
            extractor,
            generator,
        }
    }

    pub async fn generate_quiz(
        &self,
        request: GenerateQuizRequest,
        teacher_id: &str,
    ) -> AppResult<Quiz> {
        request.validate()?;
        let question_type = request.requested_type()?;

        let quiz = self.build_quiz(&request, question_type, teacher_id).await?;
        log::info!(
            "Generated quiz '{}' with {} {} questions from '{}'",
            quiz.name,
            quiz.total_questions(),
            question_type.as_str(),
            request.source.file_name()
        );

        self.quiz_repo.create(quiz).await
    }

    async fn build_quiz(
        &self,
        request: &GenerateQuizRequest,
        question_type: QuestionType,
        teacher_id: &str,
    ) -> Result<Quiz, GenerationError> {
        let text = self.extractor.extract_text(&request.source).await?;
        log::debug!(
            "Extracted {} characters from '{}'",
            text.chars().count(),
            request.source.file_name()
        );

        let raw = self
            .generator
            .generate(&text, request.nb_questions, question_type)
            .await?;

        let ctx = GenerationContext {
            fallback_title: request.fallback_title(),
            theme: request.theme.clone(),
            requested_type: question_type,
            requested_count: Some(usize::from(request.nb_questions)),
            max_score: DEFAULT_MAX_SCORE,
            course_id: request.course_id.clone(),
            created_by_user_id: Some(teacher_id.to_string()),
        };

        Ok(QuizSchemaValidator::validate(raw, &ctx)?)
    }
}
