#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;

    use crate::models::domain::{
        quiz::DEFAULT_MAX_SCORE, Answer, Question, QuestionKind, QuestionType, Quiz, Submission,
    };

    /// Quiz "quiz-1" owned by "teacher-1" with `question_count` multiple
    /// choice questions `q1..qn`. Answer `q{i}a1` is the correct one.
    pub fn sample_quiz(question_count: usize) -> Quiz {
        let questions = (1..=question_count)
            .map(|i| {
                let answers = (1..=3)
                    .map(|j| Answer {
                        id: format!("q{}a{}", i, j),
                        text: format!("Answer {} of question {}", j, i),
                        is_correct: j == 1,
                        order_index: j as i32,
                    })
                    .collect();
                Question {
                    id: format!("q{}", i),
                    text: format!("Question {}", i),
                    points: 1,
                    order_index: i as i32,
                    kind: QuestionKind::new(QuestionType::MultipleChoice, answers)
                        .expect("three answers is a valid multiple choice"),
                }
            })
            .collect();

        let now = Utc::now();
        Quiz {
            id: "quiz-1".to_string(),
            name: "Sample quiz".to_string(),
            theme: "Sample".to_string(),
            max_score: DEFAULT_MAX_SCORE,
            created_by_user_id: Some("teacher-1".to_string()),
            course_id: None,
            questions,
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    /// Selects the correct answer for every question of `quiz`.
    pub fn correct_submission(quiz: &Quiz) -> Submission {
        quiz.questions.iter().fold(Submission::new(), |submission, q| {
            let correct = q
                .answers()
                .iter()
                .find(|a| a.is_correct)
                .map(|a| a.id.clone())
                .unwrap_or_default();
            submission.with_selection(q.id.clone(), correct)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_sample_quiz_shape() {
        let quiz = sample_quiz(3);
        assert_eq!(quiz.total_questions(), 3);
        assert_eq!(quiz.questions[2].id, "q3");
        assert!(quiz.is_owned_by("teacher-1"));
    }

    #[test]
    fn test_correct_submission_covers_every_question() {
        let quiz = sample_quiz(4);
        let submission = correct_submission(&quiz);
        assert_eq!(submission.len(), 4);
        assert_eq!(submission.selection_for("q4"), Some("q4a1"));
    }
}
