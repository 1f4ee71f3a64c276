//! Repository for the `ratings` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::Rating;

const COLUMNS: &str = "id, user_id, movie_id, score, created_at, updated_at";

/// One rating per (user, movie); rating again replaces the score.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert or update the caller's rating for a movie.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        score: i16,
    ) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (user_id, movie_id, score)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_ratings_user_movie
             DO UPDATE SET score = EXCLUDED.score
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(score)
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM ratings WHERE user_id = $1 AND movie_id = $2");
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove the caller's rating. Returns `false` if there was none.
    pub async fn delete(pool: &PgPool, user_id: DbId, movie_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
