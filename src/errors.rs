use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

use crate::services::grading_service::GradingError;
use crate::services::media_extraction::ExtractionError;
use crate::services::quiz_generation_service::GenerationError;
use crate::services::quiz_schema::QuizSchemaError;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Quiz generation rejected: {0}")]
    GenerationSchema(String),

    #[error("Quiz generation failed: {0}")]
    GenerationProvider(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::GenerationSchema(_) => "GENERATION_SCHEMA_ERROR",
            AppError::GenerationProvider(_) => "GENERATION_PROVIDER_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::GenerationSchema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::GenerationProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
        })
    }
}
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl From<QuizSchemaError> for AppError {
    fn from(err: QuizSchemaError) -> Self {
        AppError::GenerationSchema(err.to_string())
    }
}
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Schema(e) => e.into(),
            GenerationError::Extraction(ExtractionError::InvalidFileName(name)) => {
                AppError::ValidationError(format!("Invalid file name '{}'", name))
            }
            GenerationError::Extraction(ExtractionError::NotFound(path)) => {
                AppError::NotFound(format!("Uploaded file not found: {}", path.display()))
            }
            other => AppError::GenerationProvider(other.to_string()),
        }
    }
}
impl From<GradingError> for AppError {
    fn from(err: GradingError) -> Self {
        AppError::GenerationSchema(err.to_string())
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::answer_key::AnswerKeyError;
    use crate::services::quiz_generator::GenerationProviderError;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden("test".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("quiz".into());
        assert_eq!(err.to_string(), "Not found: quiz");
    }

    #[test]
    fn test_generation_errors_map_to_distinct_statuses() {
        let schema: AppError = GenerationError::Schema(QuizSchemaError::AnswerKey {
            question: 2,
            source: AnswerKeyError::NoCorrectAnswer,
        })
        .into();
        assert_eq!(schema.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(schema.to_string().contains("question 2"));

        let provider: AppError =
            GenerationError::Provider(GenerationProviderError::EmptyResponse).into();
        assert_eq!(provider.status_code(), StatusCode::BAD_GATEWAY);
    }
}
