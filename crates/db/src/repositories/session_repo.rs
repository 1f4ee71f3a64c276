//! Repository for the `sessions` table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

const COLUMNS: &str = "id, subject_kind, subject_id, refresh_token_hash, expires_at, \
                       is_revoked, created_at, updated_at";

/// Provides refresh-token session persistence for users and admins.
pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (subject_kind, subject_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.subject_kind)
            .bind(input.subject_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live (not revoked, not expired) session of the given kind by token hash.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        subject_kind: &str,
        refresh_token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1
               AND subject_kind = $2
               AND NOT is_revoked
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(refresh_token_hash)
            .bind(subject_kind)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if it was live.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sessions SET is_revoked = TRUE WHERE id = $1 AND NOT is_revoked")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live session of one account. Returns the number revoked.
    pub async fn revoke_all_for_subject(
        pool: &PgPool,
        subject_kind: &str,
        subject_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET is_revoked = TRUE
             WHERE subject_kind = $1 AND subject_id = $2 AND NOT is_revoked",
        )
        .bind(subject_kind)
        .bind(subject_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
