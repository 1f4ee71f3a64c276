//! Repository for quizzes, their questions and player attempts.

use marquee_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::quiz::{
    CreateQuiz, QuestionInput, Quiz, QuizAttempt, QuizQuestion, QuizSummary, UpdateQuiz,
};

const COLUMNS: &str = "id, title, description, movie_id, is_published, created_at, updated_at";

const QUESTION_COLUMNS: &str = "id, quiz_id, prompt, options, correct_index, position";

pub struct QuizRepo;

impl QuizRepo {
    /// Insert a quiz and its questions in one transaction.
    pub async fn create_with_questions(
        pool: &PgPool,
        input: &CreateQuiz,
    ) -> Result<Quiz, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO quizzes (title, description, movie_id, is_published)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.movie_id)
            .bind(input.is_published)
            .fetch_one(&mut *tx)
            .await?;

        insert_questions(&mut tx, quiz.id, &input.questions).await?;

        tx.commit().await?;
        Ok(quiz)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_published(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1 AND is_published");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Quiz summaries, newest first.
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QuizSummary>, sqlx::Error> {
        sqlx::query_as::<_, QuizSummary>(
            "SELECT q.id, q.title, q.description, q.movie_id, q.is_published,
                    (SELECT COUNT(*) FROM quiz_questions qq
                      WHERE qq.quiz_id = q.id) AS question_count,
                    q.created_at
             FROM quizzes q
             WHERE (NOT $1::BOOLEAN OR q.is_published)
             ORDER BY q.created_at DESC, q.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(published_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool, published_only: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM quizzes WHERE (NOT $1::BOOLEAN OR is_published)")
            .bind(published_only)
            .fetch_one(pool)
            .await
    }

    /// Questions in position order, answers included.
    pub async fn questions(pool: &PgPool, quiz_id: DbId) -> Result<Vec<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM quiz_questions WHERE quiz_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    /// Update quiz fields; when `input.questions` is present the question
    /// set is replaced in the same transaction.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuiz,
    ) -> Result<Option<Quiz>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quizzes SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                movie_id = COALESCE($4, movie_id),
                is_published = COALESCE($5, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.movie_id)
            .bind(input.is_published)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(quiz) = quiz else {
            return Ok(None);
        };

        if let Some(questions) = &input.questions {
            sqlx::query("DELETE FROM quiz_questions WHERE quiz_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_questions(&mut tx, id, questions).await?;
        }

        tx.commit().await?;
        Ok(Some(quiz))
    }

    /// Delete a quiz with its questions and attempts.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn record_attempt(
        pool: &PgPool,
        quiz_id: DbId,
        user_id: DbId,
        score: i32,
        total: i32,
    ) -> Result<QuizAttempt, sqlx::Error> {
        sqlx::query_as::<_, QuizAttempt>(
            "INSERT INTO quiz_attempts (quiz_id, user_id, score, total)
             VALUES ($1, $2, $3, $4)
             RETURNING id, quiz_id, user_id, score, total, created_at",
        )
        .bind(quiz_id)
        .bind(user_id)
        .bind(score)
        .bind(total)
        .fetch_one(pool)
        .await
    }
}

/// Insert questions with positions `1..=n` in submission order.
async fn insert_questions(
    tx: &mut Transaction<'_, Postgres>,
    quiz_id: DbId,
    questions: &[QuestionInput],
) -> Result<(), sqlx::Error> {
    for (idx, question) in questions.iter().enumerate() {
        sqlx::query(
            "INSERT INTO quiz_questions (quiz_id, prompt, options, correct_index, position)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(quiz_id)
        .bind(&question.prompt)
        .bind(&question.options)
        .bind(question.correct_index)
        .bind(idx as i32 + 1)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
