//! Movie model, listing projections and DTOs.

use marquee_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::credit::CreditInfo;
use super::genre::GenreRef;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<Date>,
    pub runtime_minutes: Option<i32>,
    pub language: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Card-sized movie projection used by every listing.
///
/// `average_rating` is `None` until the movie receives its first vote.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieSummary {
    pub id: DbId,
    pub title: String,
    pub release_date: Option<Date>,
    pub runtime_minutes: Option<i32>,
    pub poster_url: Option<String>,
    pub average_rating: Option<f64>,
    pub rating_count: i64,
}

/// Aggregate engagement numbers for one movie.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct MovieStats {
    pub average_rating: Option<f64>,
    pub rating_count: i64,
    pub comment_count: i64,
    pub favorite_count: i64,
}

/// Full movie payload for the details page.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: Vec<GenreRef>,
    pub credits: Vec<CreditInfo>,
    #[serde(flatten)]
    pub stats: MovieStats,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<Date>,
    pub runtime_minutes: Option<i32>,
    pub language: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
}

/// DTO for updating a movie. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<Date>,
    pub runtime_minutes: Option<i32>,
    pub language: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
}

/// Query parameters for `GET /api/v1/movies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListParams {
    /// Case-insensitive substring match on title and original title.
    pub q: Option<String>,
    pub genre_id: Option<DbId>,
    /// Release year.
    pub year: Option<i32>,
    /// One of `newest`, `oldest`, `title`, `rating`, `popular`.
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
