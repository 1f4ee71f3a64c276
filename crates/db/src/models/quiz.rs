//! Quiz, question and attempt models and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub movie_id: Option<DbId>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection with the question count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizSummary {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub movie_id: Option<DbId>,
    pub is_published: bool,
    pub question_count: i64,
    pub created_at: Timestamp,
}

/// A row from the `quiz_questions` table, answer included.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub quiz_id: DbId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: i32,
    pub position: i32,
}

/// A question as served to players (no answer).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: DbId,
    pub prompt: String,
    pub options: Vec<String>,
    pub position: i32,
}

impl From<QuizQuestion> for PublicQuestion {
    fn from(q: QuizQuestion) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt,
            options: q.options,
            position: q.position,
        }
    }
}

/// A quiz with its questions. `Q` is [`QuizQuestion`] for admins and
/// [`PublicQuestion`] for players.
#[derive(Debug, Clone, Serialize)]
pub struct QuizWithQuestions<Q: Serialize> {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<Q>,
}

/// A row from the `quiz_attempts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizAttempt {
    pub id: DbId,
    pub quiz_id: DbId,
    pub user_id: DbId,
    pub score: i32,
    pub total: i32,
    pub created_at: Timestamp,
}

/// One authored question in a create/update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuiz {
    pub title: String,
    pub description: Option<String>,
    pub movie_id: Option<DbId>,
    #[serde(default)]
    pub is_published: bool,
    pub questions: Vec<QuestionInput>,
}

/// DTO for updating a quiz. When `questions` is present the full question
/// set is replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuiz {
    pub title: Option<String>,
    pub description: Option<String>,
    pub movie_id: Option<DbId>,
    pub is_published: Option<bool>,
    pub questions: Option<Vec<QuestionInput>>,
}
