//! Genre model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Genre with the number of movies tagged with it, for the public genre list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenreSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub movie_count: i64,
}

/// Compact genre reference embedded in movie payloads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenreRef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateGenre {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateGenre {
    pub name: Option<String>,
    pub slug: Option<String>,
}
