//! Aggregate counts for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM movies) AS movie_count,
                (SELECT COUNT(*) FROM persons) AS person_count,
                (SELECT COUNT(*) FROM users) AS user_count,
                (SELECT COUNT(*) FROM users WHERE is_active) AS active_user_count,
                (SELECT COUNT(*) FROM comments WHERE deleted_at IS NULL) AS comment_count,
                (SELECT COUNT(*) FROM comments
                  WHERE is_censored AND deleted_at IS NULL) AS censored_comment_count,
                (SELECT COUNT(*) FROM ratings) AS rating_count,
                (SELECT COUNT(*) FROM news_articles WHERE is_published) AS published_news_count,
                (SELECT COUNT(*) FROM recommendation_sections
                  WHERE is_active) AS active_section_count",
        )
        .fetch_one(pool)
        .await
    }
}
