use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A student's answer sheet: question id -> selected answer id.
///
/// Clients send ids as JSON strings or numbers. Every id is stringified once,
/// here, so `12`, `12.0` and `"12"` all name the same answer and grading only
/// ever compares strings. Blank or non-scalar selections are dropped and
/// therefore graded as unanswered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, String>"
)]
pub struct Submission {
    selections: BTreeMap<String, String>,
}

/// Canonical string form of an identifier received as JSON.
pub fn identifier_from_value(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() < 9.0e15 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
        }
        _ => return None,
    };

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selection, stringifying both ids. Returns `self` for chaining.
    pub fn with_selection(mut self, question_id: impl Into<Value>, answer_id: impl Into<Value>) -> Self {
        let question_id = identifier_from_value(&question_id.into());
        let answer_id = identifier_from_value(&answer_id.into());
        if let (Some(q), Some(a)) = (question_id, answer_id) {
            self.selections.insert(q, a);
        }
        self
    }

    pub fn selection_for(&self, question_id: &str) -> Option<&str> {
        self.selections.get(question_id.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections.iter().map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

impl From<BTreeMap<String, Value>> for Submission {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        raw.into_iter()
            .fold(Submission::new(), |submission, (question_id, answer_id)| {
                submission.with_selection(question_id, answer_id)
            })
    }
}

impl From<Submission> for BTreeMap<String, String> {
    fn from(submission: Submission) -> Self {
        submission.selections
    }
}
