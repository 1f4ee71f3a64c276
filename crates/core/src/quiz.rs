//! Quiz authoring rules and answer scoring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;
pub const MAX_QUESTIONS: usize = 50;
pub const MAX_PROMPT_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Authoring
// ---------------------------------------------------------------------------

/// Validate one question as authored in the dashboard.
pub fn validate_question(
    prompt: &str,
    options: &[String],
    correct_index: i32,
) -> Result<(), String> {
    if prompt.trim().is_empty() {
        return Err("Question prompt cannot be blank".to_string());
    }
    if prompt.chars().count() > MAX_PROMPT_LENGTH {
        return Err(format!(
            "Question prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters"
        ));
    }
    if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
        return Err(format!(
            "A question needs between {MIN_OPTIONS} and {MAX_OPTIONS} options (got {})",
            options.len()
        ));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err("Question options cannot be blank".to_string());
    }
    if correct_index < 0 || correct_index as usize >= options.len() {
        return Err(format!(
            "correct_index {correct_index} is out of range for {} options",
            options.len()
        ));
    }
    Ok(())
}

pub fn validate_question_count(count: usize) -> Result<(), String> {
    if count == 0 {
        return Err("A quiz needs at least one question".to_string());
    }
    if count > MAX_QUESTIONS {
        return Err(format!("A quiz holds at most {MAX_QUESTIONS} questions"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Answer key entry for one question.
#[derive(Debug, Clone, Copy)]
pub struct AnswerKey {
    pub question_id: DbId,
    pub correct_index: i32,
}

/// A submitted answer.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: DbId,
    pub selected_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    pub question_id: DbId,
    pub selected_index: Option<i32>,
    pub correct_index: i32,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizScore {
    pub score: i32,
    pub total: i32,
    pub results: Vec<QuestionResult>,
}

/// Score a submission against the answer key.
///
/// Unanswered questions count as wrong. Answers for questions outside the
/// quiz, or more than one answer per question, are rejected.
pub fn score_answers(key: &[AnswerKey], answers: &[SubmittedAnswer]) -> Result<QuizScore, String> {
    let mut selected: HashMap<DbId, i32> = HashMap::with_capacity(answers.len());
    for answer in answers {
        if !key.iter().any(|k| k.question_id == answer.question_id) {
            return Err(format!(
                "Question {} does not belong to this quiz",
                answer.question_id
            ));
        }
        if selected
            .insert(answer.question_id, answer.selected_index)
            .is_some()
        {
            return Err(format!(
                "Question {} was answered more than once",
                answer.question_id
            ));
        }
    }

    let results: Vec<QuestionResult> = key
        .iter()
        .map(|k| {
            let chosen = selected.get(&k.question_id).copied();
            QuestionResult {
                question_id: k.question_id,
                selected_index: chosen,
                correct_index: k.correct_index,
                is_correct: chosen == Some(k.correct_index),
            }
        })
        .collect();

    let score = results.iter().filter(|r| r.is_correct).count() as i32;

    Ok(QuizScore {
        score,
        total: key.len() as i32,
        results,
    })
}
