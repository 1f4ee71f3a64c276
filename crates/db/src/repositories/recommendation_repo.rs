//! Repository for curated recommendation sections and their movies.

use marquee_core::recommendation::{
    assign_display_orders, next_display_order, validate_section_capacity,
};
use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::recommendation::{
    CreateSection, RecommendationSection, SectionMovie, UpdateSection,
};

const COLUMNS: &str = "id, name, slug, description, is_active, position, created_at, updated_at";

/// Provides CRUD for sections and ordered membership for their movies.
pub struct RecommendationRepo;

impl RecommendationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSection,
    ) -> Result<RecommendationSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO recommendation_sections (name, slug, description, is_active, position)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecommendationSection>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.is_active)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecommendationSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recommendation_sections WHERE id = $1");
        sqlx::query_as::<_, RecommendationSection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active section by slug (public lookup).
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<RecommendationSection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendation_sections WHERE slug = $1 AND is_active"
        );
        sqlx::query_as::<_, RecommendationSection>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Sections in page order. `active_only` hides inactive ones.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
    ) -> Result<Vec<RecommendationSection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendation_sections
             WHERE (NOT $1::BOOLEAN OR is_active)
             ORDER BY position, name"
        );
        sqlx::query_as::<_, RecommendationSection>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<RecommendationSection>, sqlx::Error> {
        let query = format!(
            "UPDATE recommendation_sections SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                is_active = COALESCE($5, is_active),
                position = COALESCE($6, position)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecommendationSection>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.is_active)
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recommendation_sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Section membership
    // -----------------------------------------------------------------------

    /// Movies in a section in display order.
    pub async fn movies_for_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<SectionMovie>, sqlx::Error> {
        sqlx::query_as::<_, SectionMovie>(
            "SELECT rsm.display_order, m.id AS movie_id, m.title, m.release_date, m.poster_url,
                    (SELECT AVG(score)::FLOAT8 FROM ratings r
                      WHERE r.movie_id = m.id) AS average_rating
             FROM recommendation_section_movies rsm
             JOIN movies m ON m.id = rsm.movie_id
             WHERE rsm.section_id = $1
             ORDER BY rsm.display_order",
        )
        .bind(section_id)
        .fetch_all(pool)
        .await
    }

    /// Member movie ids in display order.
    pub async fn movie_ids(pool: &PgPool, section_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT movie_id FROM recommendation_section_movies
             WHERE section_id = $1
             ORDER BY display_order",
        )
        .bind(section_id)
        .fetch_all(pool)
        .await
    }

    /// Append a movie to the end of a section, returning its display order.
    ///
    /// The section row is locked so concurrent appends get distinct orders
    /// and see each other when checking capacity. Returns `Ok(None)` when the
    /// section is already full. Adding a movie twice is a unique violation.
    pub async fn add_movie(
        pool: &PgPool,
        section_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM recommendation_sections WHERE id = $1 FOR UPDATE")
            .bind(section_id)
            .fetch_one(&mut *tx)
            .await?;

        let (count, current_max): (i64, Option<i32>) = sqlx::query_as(
            "SELECT COUNT(*), MAX(display_order)
             FROM recommendation_section_movies WHERE section_id = $1",
        )
        .bind(section_id)
        .fetch_one(&mut *tx)
        .await?;
        if validate_section_capacity(count as usize).is_err() {
            return Ok(None);
        }
        let display_order = next_display_order(current_max);

        sqlx::query(
            "INSERT INTO recommendation_section_movies (section_id, movie_id, display_order)
             VALUES ($1, $2, $3)",
        )
        .bind(section_id)
        .bind(movie_id)
        .bind(display_order)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(display_order))
    }

    /// Remove a movie and close the gap it leaves in the ordering.
    pub async fn remove_movie(
        pool: &PgPool,
        section_id: DbId,
        movie_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM recommendation_section_movies WHERE section_id = $1 AND movie_id = $2",
        )
        .bind(section_id)
        .bind(movie_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if removed {
            sqlx::query(
                "UPDATE recommendation_section_movies rsm
                 SET display_order = ranked.new_order
                 FROM (
                     SELECT id, ROW_NUMBER() OVER (ORDER BY display_order)::INT AS new_order
                     FROM recommendation_section_movies
                     WHERE section_id = $1
                 ) ranked
                 WHERE rsm.id = ranked.id AND rsm.display_order <> ranked.new_order",
            )
            .bind(section_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(removed)
    }

    /// Apply a new ordering. `ordered` must already be validated as a
    /// permutation of the section's members.
    pub async fn reorder(
        pool: &PgPool,
        section_id: DbId,
        ordered: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (movie_id, display_order) in assign_display_orders(ordered) {
            sqlx::query(
                "UPDATE recommendation_section_movies SET display_order = $3
                 WHERE section_id = $1 AND movie_id = $2",
            )
            .bind(section_id)
            .bind(movie_id)
            .bind(display_order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
