#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use coursequiz_server::{
    errors::{AppError, AppResult},
    models::domain::{QuestionType, Quiz, QuizAttempt},
    repositories::{QuizAttemptRepository, QuizRepository},
    services::{
        media_extraction::{ExtractionError, MediaExtractor, MediaSource},
        quiz_generator::{GenerationProviderError, QuizGenerator},
        quiz_schema::{GenerationContext, QuizSchemaValidator},
    },
};

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.quizzes.read().await.len()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(ids.iter().filter_map(|id| quizzes.get(id).cloned()).collect())
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!("Quiz '{}' already exists", quiz.id)));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        match quizzes.get_mut(&quiz.id) {
            Some(existing) => {
                *existing = quiz.clone();
                Ok(quiz)
            }
            None => Err(AppError::NotFound(format!("Quiz with id '{}' not found", quiz.id))),
        }
    }
}

#[derive(Default)]
pub struct InMemoryQuizAttemptRepository {
    attempts: Arc<RwLock<Vec<QuizAttempt>>>,
}

impl InMemoryQuizAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.clone()
    }

    /// Inserts a row as an older version of the platform would have.
    pub async fn seed(&self, attempt: QuizAttempt) {
        self.attempts.write().await.push(attempt);
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn save(&self, attempt: QuizAttempt) -> AppResult<String> {
        let id = attempt.id.clone();
        self.attempts.write().await.push(attempt);
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<QuizAttempt>> {
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }
}

/// Returns fixed course text for any upload.
pub struct StaticExtractor(pub String);

#[async_trait]
impl MediaExtractor for StaticExtractor {
    async fn extract_text(&self, source: &MediaSource) -> Result<String, ExtractionError> {
        if source.file_name() == "missing.pdf" {
            return Err(ExtractionError::NotFound(source.file_name().into()));
        }
        Ok(self.0.clone())
    }
}

/// Answers every request with the same provider payload.
pub struct CannedGenerator(pub Result<Value, GenerationProviderError>);

#[async_trait]
impl QuizGenerator for CannedGenerator {
    async fn generate(
        &self,
        _source_text: &str,
        _question_count: u16,
        _question_type: QuestionType,
    ) -> Result<Value, GenerationProviderError> {
        self.0.clone()
    }
}

/// Provider payload with `count` questions; question i's correct answer is
/// flagged with `correct: true` on the first answer.
pub fn generated_payload(count: usize) -> Value {
    let questions: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "text": format!("Question {}", i),
                "type": "mcq",
                "answers": [
                    { "text": format!("Right {}", i), "correct": true },
                    { "text": format!("Wrong {}", i), "correct": false },
                    { "text": format!("Other {}", i), "correct": false }
                ]
            })
        })
        .collect();
    json!({ "title": "Quiz de test", "questions": questions })
}

pub fn generation_context() -> GenerationContext {
    GenerationContext {
        fallback_title: "Quiz généré : Test".to_string(),
        theme: "Test".to_string(),
        requested_type: QuestionType::MultipleChoice,
        requested_count: None,
        max_score: 20,
        course_id: None,
        created_by_user_id: Some("teacher-1".to_string()),
    }
}

/// A validated quiz with `count` questions, built the way generation builds it.
pub fn validated_quiz(count: usize) -> Quiz {
    QuizSchemaValidator::validate(generated_payload(count), &generation_context())
        .expect("generated payload should validate")
}

pub fn correct_answer_id(quiz: &Quiz, question_index: usize) -> String {
    quiz.questions[question_index]
        .answers()
        .iter()
        .find(|a| a.is_correct)
        .map(|a| a.id.clone())
        .expect("validated questions have a correct answer")
}

pub fn wrong_answer_id(quiz: &Quiz, question_index: usize) -> String {
    quiz.questions[question_index]
        .answers()
        .iter()
        .find(|a| !a.is_correct)
        .map(|a| a.id.clone())
        .expect("validated questions have a wrong answer")
}
