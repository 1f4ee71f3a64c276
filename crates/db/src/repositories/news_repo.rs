//! Repository for the `news_articles` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNews, NewsArticle, NewsSummary, UpdateNews};

const COLUMNS: &str = "id, title, slug, summary, body, cover_url, author_id, is_published, \
                       published_at, created_at, updated_at";

const SUMMARY_COLUMNS: &str =
    "id, title, slug, summary, cover_url, is_published, published_at, created_at";

pub struct NewsRepo;

impl NewsRepo {
    /// Insert an article. Publishing at creation stamps `published_at`.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<NewsArticle, sqlx::Error> {
        let query = format!(
            "INSERT INTO news_articles
                (title, slug, summary, body, cover_url, author_id, is_published, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $7 THEN NOW() END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.cover_url)
            .bind(input.author_id)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news_articles WHERE id = $1");
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM news_articles WHERE slug = $1 AND is_published");
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Article summaries. Published articles come first by publish date,
    /// then drafts by creation date.
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM news_articles
             WHERE (NOT $1::BOOLEAN OR is_published)
             ORDER BY published_at DESC NULLS LAST, created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, NewsSummary>(&query)
            .bind(published_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, published_only: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM news_articles WHERE (NOT $1::BOOLEAN OR is_published)",
        )
        .bind(published_only)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!(
            "UPDATE news_articles SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                summary = COALESCE($4, summary),
                body = COALESCE($5, body),
                cover_url = COALESCE($6, cover_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.cover_url)
            .fetch_optional(pool)
            .await
    }

    /// Publish or unpublish. The first publish time is kept across
    /// unpublish/republish cycles.
    pub async fn set_published(
        pool: &PgPool,
        id: DbId,
        published: bool,
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!(
            "UPDATE news_articles SET
                is_published = $2,
                published_at = CASE WHEN $2 THEN COALESCE(published_at, NOW())
                                    ELSE published_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(id)
            .bind(published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news_articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
