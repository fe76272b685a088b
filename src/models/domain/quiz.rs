use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::Question;

pub const DEFAULT_MAX_SCORE: i32 = 20;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub name: String,
    pub theme: String,
    pub max_score: i32,                     // > 0, normalized scores are out of this
    pub created_by_user_id: Option<String>, // owning teacher, None for seeded quizzes
    pub course_id: Option<String>,
    pub questions: Vec<Question>, // non-empty once published, ordered by order_index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by_user_id.as_deref() == Some(user_id)
    }

    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
