//! Repository for the `movies` table and its listing projections.

use marquee_core::catalog::MovieSort;
use marquee_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, MovieStats, MovieSummary, UpdateMovie};

/// Column list for `movies` queries.
const COLUMNS: &str = "id, title, original_title, overview, release_date, runtime_minutes, \
                       language, poster_url, backdrop_url, trailer_url, created_at, updated_at";

/// Shared `SELECT ... FROM` for [`MovieSummary`] listings.
///
/// Exposes `average_rating`, `rating_count` and `popularity` for ordering.
const SUMMARY_SELECT: &str = "\
    SELECT m.id, m.title, m.release_date, m.runtime_minutes, m.poster_url, \
           r.average_rating, COALESCE(r.rating_count, 0) AS rating_count, \
           COALESCE(r.rating_count, 0) + COALESCE(l.list_count, 0) AS popularity \
    FROM movies m \
    LEFT JOIN ( \
        SELECT movie_id, AVG(score)::FLOAT8 AS average_rating, COUNT(*) AS rating_count \
        FROM ratings GROUP BY movie_id \
    ) r ON r.movie_id = m.id \
    LEFT JOIN ( \
        SELECT movie_id, COUNT(*) AS list_count \
        FROM user_movie_lists GROUP BY movie_id \
    ) l ON l.movie_id = m.id";

/// Shared filter for [`MovieRepo::list`] and [`MovieRepo::count`].
const LIST_FILTER: &str = "\
    WHERE ($1::TEXT IS NULL OR m.title ILIKE $1 OR m.original_title ILIKE $1) \
      AND ($2::BIGINT IS NULL OR EXISTS ( \
            SELECT 1 FROM movie_genres mg WHERE mg.movie_id = m.id AND mg.genre_id = $2)) \
      AND ($3::INT IS NULL OR EXTRACT(YEAR FROM m.release_date)::INT = $3)";

/// Resolved listing filter. Built by the handler from query parameters
/// after validation and clamping.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    /// `ILIKE` pattern, already escaped.
    pub pattern: Option<String>,
    pub genre_id: Option<DbId>,
    pub year: Option<i32>,
    pub sort: MovieSort,
    pub limit: i64,
    pub offset: i64,
}

/// Provides CRUD operations and listings for movies.
pub struct MovieRepo;

impl MovieRepo {
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, original_title, overview, release_date, runtime_minutes,
                                 language, poster_url, backdrop_url, trailer_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.original_title)
            .bind(&input.overview)
            .bind(input.release_date)
            .bind(input.runtime_minutes)
            .bind(&input.language)
            .bind(&input.poster_url)
            .bind(&input.backdrop_url)
            .bind(&input.trailer_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Filtered, sorted, paginated movie listing.
    pub async fn list(
        pool: &PgPool,
        filter: &MovieFilter,
    ) -> Result<Vec<MovieSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} {LIST_FILTER} ORDER BY {} LIMIT $4 OFFSET $5",
            filter.sort.order_by()
        );
        sqlx::query_as::<_, MovieSummary>(&query)
            .bind(&filter.pattern)
            .bind(filter.genre_id)
            .bind(filter.year)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of movies matching `filter` (ignores sort and paging).
    pub async fn count(pool: &PgPool, filter: &MovieFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM movies m {LIST_FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.pattern)
            .bind(filter.genre_id)
            .bind(filter.year)
            .fetch_one(pool)
            .await
    }

    /// Movies released between `since` and `today` inclusive, newest first.
    pub async fn new_releases(
        pool: &PgPool,
        since: Date,
        today: Date,
        limit: i64,
    ) -> Result<Vec<MovieSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE m.release_date BETWEEN $1 AND $2
             ORDER BY m.release_date DESC, m.id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, MovieSummary>(&query)
            .bind(since)
            .bind(today)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Highest average rating first among movies with at least `min_votes` ratings.
    pub async fn top_rated(
        pool: &PgPool,
        min_votes: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MovieSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE COALESCE(r.rating_count, 0) >= $1
             ORDER BY r.average_rating DESC NULLS LAST, r.rating_count DESC, m.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MovieSummary>(&query)
            .bind(min_votes)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Rating, comment and favorite aggregates for one movie.
    pub async fn stats(pool: &PgPool, id: DbId) -> Result<MovieStats, sqlx::Error> {
        sqlx::query_as::<_, MovieStats>(
            "SELECT
                (SELECT AVG(score)::FLOAT8 FROM ratings WHERE movie_id = $1) AS average_rating,
                (SELECT COUNT(*) FROM ratings WHERE movie_id = $1) AS rating_count,
                (SELECT COUNT(*) FROM comments
                  WHERE movie_id = $1 AND deleted_at IS NULL) AS comment_count,
                (SELECT COUNT(*) FROM user_movie_lists
                  WHERE movie_id = $1 AND list_type = 'favorites') AS favorite_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                original_title = COALESCE($3, original_title),
                overview = COALESCE($4, overview),
                release_date = COALESCE($5, release_date),
                runtime_minutes = COALESCE($6, runtime_minutes),
                language = COALESCE($7, language),
                poster_url = COALESCE($8, poster_url),
                backdrop_url = COALESCE($9, backdrop_url),
                trailer_url = COALESCE($10, trailer_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.original_title)
            .bind(&input.overview)
            .bind(input.release_date)
            .bind(input.runtime_minutes)
            .bind(&input.language)
            .bind(&input.poster_url)
            .bind(&input.backdrop_url)
            .bind(&input.trailer_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie. Genres, credits, ratings, list entries, comments and
    /// section memberships go with it; sections that held the movie are
    /// renumbered so their display orders stay `1..=n`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let sections: Vec<DbId> = sqlx::query_scalar(
            "SELECT section_id FROM recommendation_section_movies WHERE movie_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted && !sections.is_empty() {
            sqlx::query(
                "UPDATE recommendation_section_movies rsm
                 SET display_order = ranked.new_order
                 FROM (
                     SELECT id, ROW_NUMBER() OVER (
                         PARTITION BY section_id ORDER BY display_order
                     )::INT AS new_order
                     FROM recommendation_section_movies
                     WHERE section_id = ANY($1)
                 ) ranked
                 WHERE rsm.id = ranked.id AND rsm.display_order <> ranked.new_order",
            )
            .bind(&sections)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
