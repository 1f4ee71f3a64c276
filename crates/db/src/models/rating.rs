//! Movie rating model.

use marquee_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub score: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
