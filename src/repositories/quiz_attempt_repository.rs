use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::QuizAttempt,
};

/// Attempts are append-only: saved once per submission, never updated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn save(&self, attempt: QuizAttempt) -> AppResult<String>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    /// No ordering guarantee; callers sort by `submitted_at`.
    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<QuizAttempt>>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.quiz_attempts(),
        }
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn save(&self, attempt: QuizAttempt) -> AppResult<String> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt.id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "student_id": student_id })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }
}
