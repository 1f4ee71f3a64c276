//! Repository for the `genres` and `movie_genres` tables.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::{CreateGenre, Genre, GenreRef, GenreSummary, UpdateGenre};

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides CRUD operations for genres and movie-genre associations.
pub struct GenreRepo;

impl GenreRepo {
    pub async fn create(pool: &PgPool, input: &CreateGenre) -> Result<Genre, sqlx::Error> {
        let query = format!(
            "INSERT INTO genres (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All genres alphabetically, with the number of movies in each.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<GenreSummary>, sqlx::Error> {
        sqlx::query_as::<_, GenreSummary>(
            "SELECT g.id, g.name, g.slug, COUNT(mg.movie_id) AS movie_count
             FROM genres g
             LEFT JOIN movie_genres mg ON mg.genre_id = g.id
             GROUP BY g.id
             ORDER BY g.name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGenre,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!(
            "UPDATE genres SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_optional(pool)
            .await
    }

    /// Delete a genre. Movie associations are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Genres attached to a movie, alphabetically.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<GenreRef>, sqlx::Error> {
        sqlx::query_as::<_, GenreRef>(
            "SELECT g.id, g.name, g.slug
             FROM movie_genres mg
             JOIN genres g ON g.id = mg.genre_id
             WHERE mg.movie_id = $1
             ORDER BY g.name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a movie's genre set in one transaction.
    ///
    /// Unknown genre ids surface as a foreign-key violation.
    pub async fn set_for_movie(
        pool: &PgPool,
        movie_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        if !genre_ids.is_empty() {
            sqlx::query(
                "INSERT INTO movie_genres (movie_id, genre_id)
                 SELECT $1, UNNEST($2::BIGINT[])
                 ON CONFLICT DO NOTHING",
            )
            .bind(movie_id)
            .bind(genre_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
