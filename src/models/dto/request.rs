use async_graphql::{InputObject, ID};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{QuestionType, Submission};
use crate::services::media_extraction::MediaSource;
use crate::services::quiz_schema::{DraftAnswer, DraftQuestion};

pub const DEFAULT_QUESTION_COUNT: u16 = 10;
pub const DEFAULT_GENERATION_TYPE: &str = "mcq";

fn default_question_count() -> u16 {
    DEFAULT_QUESTION_COUNT
}

fn default_generation_type() -> String {
    DEFAULT_GENERATION_TYPE.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub source: MediaSource,

    #[serde(default = "default_question_count")]
    #[validate(range(min = 1, max = 50))]
    pub nb_questions: u16,

    #[serde(default = "default_generation_type", rename = "type")]
    pub question_type: String,

    #[validate(length(max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub theme: String,

    pub course_id: Option<String>,
}

impl GenerateQuizRequest {
    pub fn requested_type(&self) -> AppResult<QuestionType> {
        QuestionType::parse(&self.question_type).ok_or_else(|| {
            AppError::ValidationError(format!(
                "type must be 'mcq' or 'true_false', got '{}'",
                self.question_type
            ))
        })
    }

    /// Quiz name used when the generator does not supply a title. Labels the
    /// source by its title, or by the theme when it has none.
    pub fn fallback_title(&self) -> String {
        let label = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.theme.as_str());
        match self.source {
            MediaSource::Document(_) => format!("Quiz généré : {}", label),
            MediaSource::Video(_) => format!("Quiz Vidéo : {}", label),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionsRequest {
    #[validate(length(min = 1, max = 100))]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub text: String,
    pub points: Option<i32>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub id: Option<String>,
    pub text: String,
    pub is_correct: bool,
}

impl From<QuestionInput> for DraftQuestion {
    fn from(input: QuestionInput) -> Self {
        DraftQuestion {
            text: Some(input.text),
            points: input.points.unwrap_or(1),
            question_type: input.question_type,
            answers: input
                .answers
                .into_iter()
                .map(|a| DraftAnswer {
                    id: a.id,
                    text: Some(a.text),
                    is_correct: a.is_correct,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct SubmittedAnswerInput {
    pub question_id: ID,
    pub answer_id: ID,
}

impl From<Vec<SubmittedAnswerInput>> for Submission {
    fn from(answers: Vec<SubmittedAnswerInput>) -> Self {
        answers.into_iter().fold(Submission::new(), |submission, answer| {
            submission.with_selection(answer.question_id.0, answer.answer_id.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generation_request_defaults_count_and_type() {
        let request: GenerateQuizRequest = serde_json::from_value(json!({
            "source": { "kind": "document", "file": "cours.pdf" },
            "theme": "Biologie"
        }))
        .expect("request should parse");

        assert_eq!(request.nb_questions, 10);
        assert_eq!(request.requested_type().ok(), Some(QuestionType::MultipleChoice));
        assert_eq!(request.fallback_title(), "Quiz généré : Biologie");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn generation_request_rejects_bad_count_and_type() {
        let request: GenerateQuizRequest = serde_json::from_value(json!({
            "source": { "kind": "video", "file": "cours.mp4" },
            "nbQuestions": 0,
            "type": "essay",
            "theme": "Histoire"
        }))
        .expect("request should parse");

        assert!(request.validate().is_err());
        assert!(request.requested_type().is_err());
        assert_eq!(request.fallback_title(), "Quiz Vidéo : Histoire");
    }

    #[test]
    fn graphql_answers_convert_to_submission() {
        let submission: Submission = vec![
            SubmittedAnswerInput {
                question_id: ID::from("1"),
                answer_id: ID::from("12"),
            },
            SubmittedAnswerInput {
                question_id: ID::from("2"),
                answer_id: ID::from(" "),
            },
        ]
        .into();

        assert_eq!(submission.selection_for("1"), Some("12"));
        assert_eq!(submission.selection_for("2"), None);
    }

    #[test]
    fn question_input_becomes_draft() {
        let input: QuestionInput = serde_json::from_value(json!({
            "text": "Q",
            "type": "true_false",
            "answers": [
                { "text": "Vrai", "isCorrect": true },
                { "id": "keep-me", "text": "Faux", "isCorrect": false }
            ]
        }))
        .expect("input should parse");

        let draft = DraftQuestion::from(input);
        assert_eq!(draft.points, 1);
        assert_eq!(draft.question_type, QuestionType::TrueFalse);
        assert_eq!(draft.answers[1].id.as_deref(), Some("keep-me"));
    }

    #[test]
    fn question_replacement_needs_at_least_one_question() {
        let empty = UpdateQuestionsRequest { questions: Vec::new() };
        let errors = empty.validate().expect_err("empty replacement should fail");
        assert!(errors.field_errors().contains_key("questions"));

        let request: UpdateQuestionsRequest = serde_json::from_value(json!({
            "questions": [{
                "text": "Q",
                "type": "multiple_choice",
                "answers": [
                    { "text": "A", "isCorrect": true },
                    { "text": "B", "isCorrect": false }
                ]
            }]
        }))
        .expect("request should parse");
        assert!(request.validate().is_ok());
    }
}
