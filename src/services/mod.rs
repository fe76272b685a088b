pub mod answer_key;
pub mod grading_service;
pub mod media_extraction;
pub mod quiz_attempt_service;
pub mod quiz_generation_service;
pub mod quiz_generator;
pub mod quiz_schema;
pub mod quiz_service;
pub mod score_reconciler;

pub use grading_service::{GradingEngine, GradingOutcome};
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_generation_service::QuizGenerationService;
pub use quiz_service::QuizService;
pub use score_reconciler::ScoreReconciler;
