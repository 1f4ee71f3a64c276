//! Per-user movie list entries.

use marquee_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A movie on one of the caller's lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListedMovie {
    pub list_type: String,
    pub added_at: Timestamp,
    pub movie_id: DbId,
    pub title: String,
    pub release_date: Option<Date>,
    pub poster_url: Option<String>,
}
