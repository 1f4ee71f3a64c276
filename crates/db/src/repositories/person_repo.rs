//! Repository for the `persons` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::credit::FilmographyEntry;
use crate::models::person::{CreatePerson, Person, UpdatePerson};

const COLUMNS: &str =
    "id, name, biography, birth_date, birth_place, profile_url, created_at, updated_at";

/// Provides CRUD operations for persons (cast and crew).
pub struct PersonRepo;

impl PersonRepo {
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO persons (name, biography, birth_date, birth_place, profile_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.name)
            .bind(&input.biography)
            .bind(input.birth_date)
            .bind(&input.birth_place)
            .bind(&input.profile_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List persons by name, optionally filtered by an `ILIKE` pattern.
    pub async fn list(
        pool: &PgPool,
        pattern: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM persons
             WHERE ($1::TEXT IS NULL OR name ILIKE $1)
             ORDER BY name, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, pattern: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM persons WHERE ($1::TEXT IS NULL OR name ILIKE $1)")
            .bind(pattern)
            .fetch_one(pool)
            .await
    }

    /// Every movie the person is credited on, newest release first.
    pub async fn filmography(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<Vec<FilmographyEntry>, sqlx::Error> {
        sqlx::query_as::<_, FilmographyEntry>(
            "SELECT m.id AS movie_id, m.title, m.release_date, m.poster_url,
                    mp.credit_type, mp.character_name
             FROM movie_persons mp
             JOIN movies m ON m.id = mp.movie_id
             WHERE mp.person_id = $1
             ORDER BY m.release_date DESC NULLS LAST, m.id DESC, mp.credit_type",
        )
        .bind(person_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE persons SET
                name = COALESCE($2, name),
                biography = COALESCE($3, biography),
                birth_date = COALESCE($4, birth_date),
                birth_place = COALESCE($5, birth_place),
                profile_url = COALESCE($6, profile_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.biography)
            .bind(input.birth_date)
            .bind(&input.birth_place)
            .bind(&input.profile_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a person. Their credits are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
