//! News article model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `news_articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsArticle {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body: String,
    pub cover_url: Option<String>,
    pub author_id: Option<DbId>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection without the article body.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub cover_url: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

pub struct CreateNews {
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body: String,
    pub cover_url: Option<String>,
    pub author_id: Option<DbId>,
    pub is_published: bool,
}

#[derive(Debug, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub cover_url: Option<String>,
}
