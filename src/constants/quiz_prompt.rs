use crate::models::domain::QuestionType;
use crate::models::dto::generated_quiz::GeneratedQuiz;

pub const QUIZ_JSON_STRUCTURE: &str = r#"{
    "title": "Quiz title",
    "questions": [
        {
            "text": "Question?",
            "points": 1,
            "type": "multiple_choice",
            "answers": [
                {"text": "Answer A", "isCorrect": true},
                {"text": "Answer B", "isCorrect": false}
            ]
        }
    ]
}"#;

pub const QUIZ_GENERATOR_PROMPT: &str = r#"You are an expert teacher writing an assessment quiz from course material.

## ACCURACY REQUIREMENTS

- Every question and every correct answer must be directly supported by the course material
- Do not add facts that are not present in the material
- Write questions and answers in the language of the course material

## ANSWER KEY RULES

- Each question has exactly ONE answer with "isCorrect": true; every other answer has "isCorrect": false
- "multiple_choice" questions have between 3 and 4 answers
- "true_false" questions have exactly 2 answers, the true statement and the false one

## OUTPUT FORMAT

Return ONLY a valid JSON object with this structure. No prose, no markdown, no extra keys:
"#;

/// System prompt for one generation request.
pub fn system_prompt(question_count: u16, question_type: QuestionType) -> String {
    let schema = serde_json::to_string(&schemars::schema_for!(GeneratedQuiz))
        .unwrap_or_default();

    format!(
        "{QUIZ_GENERATOR_PROMPT}{QUIZ_JSON_STRUCTURE}\n\n\
         JSON Schema of the expected object:\n{schema}\n\n\
         ## REQUEST\n\n\
         - Number of questions: {question_count}\n\
         - Question type for every question: \"{}\"",
        question_type.as_str()
    )
}

pub fn user_prompt(source_text: &str) -> String {
    format!("Here is the course material:\n\n{source_text}")
}
