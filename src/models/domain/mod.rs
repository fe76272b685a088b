pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod submission;
pub use quiz::Quiz;
pub use quiz_attempt::QuizAttempt;
pub use quiz_question::{Answer, Question, QuestionKind, QuestionType};
pub use submission::Submission;
