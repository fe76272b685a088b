use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizAttemptRepository, MongoQuizRepository, QuizAttemptRepository, QuizRepository,
    },
    services::{
        media_extraction::{MediaExtractor, UploadedMediaExtractor},
        quiz_generator::{MistralQuizGenerator, QuizGenerator},
        QuizAttemptService, QuizGenerationService, QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub quiz_generation_service: Arc<QuizGenerationService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        db.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));

        let extractor = Arc::new(UploadedMediaExtractor::from_config(&config));
        let generator = Arc::new(MistralQuizGenerator::from_config(&config));

        let mut state = Self::from_parts(
            config,
            quiz_repository,
            attempt_repository,
            extractor,
            generator,
        );
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over arbitrary backends. Used by `new` and by tests.
    pub fn from_parts(
        config: Config,
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
        extractor: Arc<dyn MediaExtractor>,
        generator: Arc<dyn QuizGenerator>,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone()));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(
            quiz_repository.clone(),
            attempt_repository,
        ));
        let quiz_generation_service = Arc::new(QuizGenerationService::new(
            quiz_repository,
            extractor,
            generator,
        ));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            quiz_service,
            quiz_attempt_service,
            quiz_generation_service,
            jwt_service,
            config: Arc::new(config),
            db: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
