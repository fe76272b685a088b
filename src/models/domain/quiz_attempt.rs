use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::submission::Submission;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub student_id: String,
    pub quiz_id: String,
    pub submitted_answers: Submission,
    #[serde(default)]
    pub score: StoredScore,
    /// Scorable questions at grading time. `None` for rows that predate it.
    #[serde(default)]
    pub total_questions: Option<i32>,
    #[serde(default)]
    pub breakdown: Vec<QuestionOutcome>, // empty for legacy rows
    pub submitted_at: DateTime<Utc>,
}

/// How a stored score should be read.
///
/// Attempts written by the grading engine always hold the raw count of
/// correct answers. Historical rows may hold either a raw count or a mark
/// already scaled to 20 in the same field; those are imported as `Legacy`
/// and only ever interpreted by the score reconciler.
///
/// Written as `{"kind": .., "value": ..}`. A bare number (or null) in the
/// field is a historical row and reads as `Legacy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "StoredScoreRepr")]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StoredScore {
    RawCorrectCount(i32),
    Legacy(i32),
}

impl Default for StoredScore {
    fn default() -> Self {
        StoredScore::Legacy(0)
    }
}

#[derive(Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
enum TaggedScore {
    RawCorrectCount(i32),
    Legacy(i32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredScoreRepr {
    Tagged(TaggedScore),
    Integer(i64),
    Float(f64),
    Missing(()),
}

impl From<StoredScoreRepr> for StoredScore {
    fn from(repr: StoredScoreRepr) -> Self {
        match repr {
            StoredScoreRepr::Tagged(TaggedScore::RawCorrectCount(n)) => {
                StoredScore::RawCorrectCount(n)
            }
            StoredScoreRepr::Tagged(TaggedScore::Legacy(n)) => StoredScore::Legacy(n),
            StoredScoreRepr::Integer(n) => {
                StoredScore::Legacy(n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
            }
            StoredScoreRepr::Float(f) if f.is_finite() => StoredScore::Legacy(f.round() as i32),
            StoredScoreRepr::Float(_) | StoredScoreRepr::Missing(()) => StoredScore::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question_id: String,
    pub is_correct: bool,
    pub selected_answer_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_attempt(score: StoredScore) -> QuizAttempt {
        QuizAttempt {
            id: "attempt-1".to_string(),
            student_id: "student-1".to_string(),
            quiz_id: "quiz-1".to_string(),
            submitted_answers: Submission::new().with_selection("q1", "a1"),
            score,
            total_questions: Some(1),
            breakdown: vec![QuestionOutcome {
                question_id: "q1".to_string(),
                is_correct: true,
                selected_answer_id: Some("a1".to_string()),
            }],
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn quiz_attempt_round_trip_serialization_preserves_score_kind() {
        let attempt = make_attempt(StoredScore::RawCorrectCount(1));

        let json = serde_json::to_string(&attempt).expect("attempt should serialize");
        let parsed: QuizAttempt = serde_json::from_str(&json).expect("attempt should deserialize");

        assert_eq!(parsed.score, StoredScore::RawCorrectCount(1));
        assert_eq!(parsed.total_questions, Some(1));
        assert_eq!(parsed.breakdown.len(), 1);
        assert_eq!(parsed.submitted_answers.selection_for("q1"), Some("a1"));
    }

    #[test]
    fn legacy_attempt_without_breakdown_deserializes() {
        let json = serde_json::json!({
            "id": "legacy-1",
            "student_id": "student-1",
            "quiz_id": "quiz-1",
            "submitted_answers": { "5": 51 },
            "score": { "kind": "legacy", "value": 18 },
            "submitted_at": "2024-03-01T10:00:00Z"
        });

        let parsed: QuizAttempt = serde_json::from_value(json).expect("legacy row should parse");
        assert_eq!(parsed.score, StoredScore::Legacy(18));
        assert!(parsed.breakdown.is_empty());
        assert_eq!(parsed.submitted_answers.selection_for("5"), Some("51"));
    }

    fn legacy_row(score: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "legacy-2",
            "student_id": "student-1",
            "quiz_id": "quiz-1",
            "submitted_answers": {},
            "score": score,
            "submitted_at": "2023-11-20T08:30:00Z"
        })
    }

    #[test]
    fn bare_integer_score_reads_as_legacy() {
        let parsed: QuizAttempt = serde_json::from_value(legacy_row(serde_json::json!(18)))
            .expect("plain integer score should parse");

        assert_eq!(parsed.score, StoredScore::Legacy(18));
        assert_eq!(parsed.total_questions, None);
    }

    #[test]
    fn float_and_null_scores_read_as_legacy() {
        let parsed: QuizAttempt =
            serde_json::from_value(legacy_row(serde_json::json!(14.0))).unwrap();
        assert_eq!(parsed.score, StoredScore::Legacy(14));

        let parsed: QuizAttempt =
            serde_json::from_value(legacy_row(serde_json::Value::Null)).unwrap();
        assert_eq!(parsed.score, StoredScore::Legacy(0));
    }

    #[test]
    fn new_rows_keep_the_tagged_shape() {
        let json = serde_json::to_value(StoredScore::RawCorrectCount(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "raw_correct_count", "value": 3 }));

        let parsed: StoredScore = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, StoredScore::RawCorrectCount(3));
    }
}
