//! Display-time interpretation of stored attempt scores.
//!
//! Older write paths stored either the number of correct answers or a mark
//! already scaled to 20 in the same column. For those rows the stored value is
//! disambiguated with a threshold heuristic: a score above the question count
//! cannot be a raw count, so it is read as a mark out of 20. The heuristic
//! cannot tell the two apart when the raw count and the mark are both within
//! `0..=total_questions`, which is unavoidable once a quiz has 20 or more
//! questions. New attempts store `StoredScore::RawCorrectCount` and never go
//! through it.

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_attempt::StoredScore;
use crate::models::domain::QuizAttempt;
use crate::services::grading_service::round_half_up_div;

/// Scale assumed for legacy marks.
pub const LEGACY_NORMALIZED_SCALE: i64 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl GradeBand {
    /// Label shown to students.
    pub fn label(&self) -> &'static str {
        match self {
            GradeBand::Excellent => "Excellent",
            GradeBand::Good => "Bien",
            GradeBand::Average => "Moyen",
            GradeBand::NeedsImprovement => "À améliorer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconciledScore {
    pub display_score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub grade_band: GradeBand,
}

/// Raw correct-count for a legacy stored score.
pub fn reconcile_score(score: i32, total_questions: i32) -> i32 {
    let score = score.max(0);
    if total_questions > 0 && score > total_questions {
        let raw = round_half_up_div(
            i64::from(score) * i64::from(total_questions),
            LEGACY_NORMALIZED_SCALE,
        );
        // a corrupt mark above 20 must not display more than the quiz holds
        raw.min(i64::from(total_questions)) as i32
    } else {
        score
    }
}

pub fn percentage(display_score: i32, total_questions: i32) -> f64 {
    if total_questions <= 0 {
        return 0.0;
    }
    f64::from(display_score) / f64::from(total_questions) * 100.0
}

/// Lower bounds are inclusive: 80, 60, 50.
pub fn grade_band(display_score: i32, total_questions: i32) -> GradeBand {
    // integer comparison keeps 4/5 exactly on the 80% boundary
    let score = i64::from(display_score.max(0)) * 100;
    let total = i64::from(total_questions);
    if total <= 0 {
        GradeBand::NeedsImprovement
    } else if score >= 80 * total {
        GradeBand::Excellent
    } else if score >= 60 * total {
        GradeBand::Good
    } else if score >= 50 * total {
        GradeBand::Average
    } else {
        GradeBand::NeedsImprovement
    }
}

pub struct ScoreReconciler;

impl ScoreReconciler {
    pub fn reconcile(stored: StoredScore, total_questions: i32) -> ReconciledScore {
        let total_questions = total_questions.max(0);
        let display_score = match stored {
            StoredScore::RawCorrectCount(raw) => raw.clamp(0, total_questions),
            StoredScore::Legacy(score) => reconcile_score(score, total_questions),
        };

        ReconciledScore {
            display_score,
            total_questions,
            percentage: percentage(display_score, total_questions),
            grade_band: grade_band(display_score, total_questions),
        }
    }

    /// Reconciles against the total recorded at grading time. Rows written
    /// before it was recorded fall back to `current_total`.
    pub fn reconcile_attempt(attempt: &QuizAttempt, current_total: i32) -> ReconciledScore {
        let total = attempt.total_questions.unwrap_or(current_total);
        Self::reconcile(attempt.score, total)
    }
}
