//! Person (actor / crew) model and DTOs.

use marquee_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::credit::FilmographyEntry;

/// A row from the `persons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub biography: Option<String>,
    pub birth_date: Option<Date>,
    pub birth_place: Option<String>,
    pub profile_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Person page payload: the person plus every credited movie.
#[derive(Debug, Clone, Serialize)]
pub struct PersonDetails {
    #[serde(flatten)]
    pub person: Person,
    pub filmography: Vec<FilmographyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub name: String,
    pub biography: Option<String>,
    pub birth_date: Option<Date>,
    pub birth_place: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePerson {
    pub name: Option<String>,
    pub biography: Option<String>,
    pub birth_date: Option<Date>,
    pub birth_place: Option<String>,
    pub profile_url: Option<String>,
}

/// Query parameters for `GET /api/v1/persons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonListParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
