use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Quiz as emitted by the generation provider, before validation.
///
/// Every field is optional or loosely typed: the provider is not trusted, and
/// the schema validator turns this into a `Quiz` or a precise error.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedQuiz {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedQuestion {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub points: Option<Value>,
    #[serde(default, rename = "type")]
    pub question_type: Option<String>,
    #[serde(default)]
    pub answers: Vec<GeneratedAnswer>,
}

/// Correctness may arrive as `correct` or `isCorrect`, as a bool or 0/1.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedAnswer {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<Value>,
    #[serde(default, rename = "isCorrect", skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generated_quiz_tolerates_missing_fields() {
        let quiz: GeneratedQuiz = serde_json::from_value(json!({
            "questions": [{ "text": "Q?", "answers": [{ "text": "A", "correct": 1 }] }]
        }))
        .expect("partial quiz should parse");

        assert!(quiz.title.is_none());
        assert_eq!(quiz.questions.len(), 1);
        assert!(quiz.questions[0].points.is_none());
        assert_eq!(quiz.questions[0].answers[0].correct, Some(json!(1)));
        assert!(quiz.questions[0].answers[0].is_correct.is_none());
    }

    #[test]
    fn generated_answer_reads_is_correct_camel_case() {
        let answer: GeneratedAnswer =
            serde_json::from_value(json!({ "text": "B", "isCorrect": true }))
                .expect("answer should parse");

        assert_eq!(answer.is_correct, Some(json!(true)));
    }
}
