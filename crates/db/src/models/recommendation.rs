//! Recommendation section models and DTOs.

use marquee_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recommendation_sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecommendationSection {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movie inside a section, in display order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SectionMovie {
    pub display_order: i32,
    pub movie_id: DbId,
    pub title: String,
    pub release_date: Option<Date>,
    pub poster_url: Option<String>,
    pub average_rating: Option<f64>,
}

/// A section together with its ordered movies.
#[derive(Debug, Clone, Serialize)]
pub struct SectionWithMovies {
    #[serde(flatten)]
    pub section: RecommendationSection,
    pub movies: Vec<SectionMovie>,
}

pub struct CreateSection {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub position: i32,
}

#[derive(Debug, Default)]
pub struct UpdateSection {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub position: Option<i32>,
}

/// Body of `POST /admin/recommendations/{id}/movies`.
#[derive(Debug, Deserialize)]
pub struct AddSectionMovie {
    pub movie_id: DbId,
}

/// Body of `PUT /admin/recommendations/{id}/movies/order`.
#[derive(Debug, Deserialize)]
pub struct ReorderSectionMovies {
    pub movie_ids: Vec<DbId>,
}
