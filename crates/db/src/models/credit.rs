//! Movie credits (the `movie_persons` join table).

use marquee_core::types::{Date, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A credited person as shown on a movie page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreditInfo {
    pub person_id: DbId,
    pub name: String,
    pub profile_url: Option<String>,
    pub credit_type: String,
    pub character_name: Option<String>,
    pub billing_order: i32,
}

/// A movie as shown on a person's filmography.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FilmographyEntry {
    pub movie_id: DbId,
    pub title: String,
    pub release_date: Option<Date>,
    pub poster_url: Option<String>,
    pub credit_type: String,
    pub character_name: Option<String>,
}

/// One credit in a `PUT /admin/movies/{id}/credits` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditInput {
    pub person_id: DbId,
    pub credit_type: String,
    pub character_name: Option<String>,
    /// Defaults to the credit's position in the submitted list.
    pub billing_order: Option<i32>,
}
