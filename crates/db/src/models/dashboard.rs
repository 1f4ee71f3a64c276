//! Admin dashboard aggregate counts.

use serde::Serialize;
use sqlx::FromRow;

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardStats {
    pub movie_count: i64,
    pub person_count: i64,
    pub user_count: i64,
    pub active_user_count: i64,
    pub comment_count: i64,
    pub censored_comment_count: i64,
    pub rating_count: i64,
    pub published_news_count: i64,
    pub active_section_count: i64,
}
