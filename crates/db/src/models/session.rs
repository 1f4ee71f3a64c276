//! Refresh-token session model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// `subject_kind` for sessions owned by a public account.
pub const SUBJECT_USER: &str = "user";

/// `subject_kind` for sessions owned by a back-office account.
pub const SUBJECT_ADMIN: &str = "admin";

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub subject_kind: String,
    pub subject_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub subject_kind: &'static str,
    pub subject_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
