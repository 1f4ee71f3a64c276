//! Repository for the `admins` table.

use marquee_core::roles::ROLE_SUPER_ADMIN;
use marquee_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::admin::{Admin, CreateAdmin, UpdateAdmin};
use crate::models::session::SUBJECT_ADMIN;

const COLUMNS: &str = "id, username, email, password_hash, role, is_active, \
                       failed_login_count, locked_until, last_login_at, created_at, updated_at";

/// Provides CRUD operations for back-office accounts.
pub struct AdminRepo;

impl AdminRepo {
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin by username or email, for login.
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admins WHERE username = $1 OR lower(email) = lower($1) LIMIT 1"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// List all admins ordered by username.
    pub async fn list(pool: &PgPool) -> Result<Vec<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins ORDER BY username");
        sqlx::query_as::<_, Admin>(&query).fetch_all(pool).await
    }

    /// Lock the active super admins and the target row for a guarded change.
    ///
    /// Returns the target with the number of active super admins, or `None`
    /// when the target does not exist. Super admin rows are locked in id
    /// order so concurrent guarded changes serialize instead of deadlocking.
    async fn lock_for_change(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<(Admin, i64)>, sqlx::Error> {
        let super_admins: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM admins WHERE role = $1 AND is_active ORDER BY id FOR UPDATE",
        )
        .bind(ROLE_SUPER_ADMIN)
        .fetch_all(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1 FOR UPDATE");
        let target = sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(target.map(|admin| (admin, super_admins.len() as i64)))
    }

    /// Update an admin once `check` approves the change.
    ///
    /// `check` receives the current row and the number of active super
    /// admins, both read under lock in the same transaction as the update.
    /// Returns `Ok(None)` when the admin does not exist. Only non-`None`
    /// fields in `input` are applied.
    pub async fn update_checked<E>(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdmin,
        check: impl FnOnce(&Admin, i64) -> Result<(), E>,
    ) -> Result<Option<Admin>, E>
    where
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;
        let locked = Self::lock_for_change(&mut tx, id).await?;
        let Some((target, active_super_admins)) = locked else {
            return Ok(None);
        };
        check(&target, active_super_admins)?;

        let query = format!(
            "UPDATE admins SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let admin = sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(admin))
    }

    /// Permanently delete an admin and revoke their sessions once `check`
    /// approves, under the same locking as [`AdminRepo::update_checked`].
    ///
    /// Authored news and censorship records keep their rows with the admin
    /// reference nulled. Returns `Ok(false)` when the admin does not exist.
    pub async fn delete_checked<E>(
        pool: &PgPool,
        id: DbId,
        check: impl FnOnce(&Admin, i64) -> Result<(), E>,
    ) -> Result<bool, E>
    where
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;
        let locked = Self::lock_for_change(&mut tx, id).await?;
        let Some((target, active_super_admins)) = locked else {
            return Ok(false);
        };
        check(&target, active_super_admins)?;

        sqlx::query("DELETE FROM sessions WHERE subject_kind = $1 AND subject_id = $2")
            .bind(SUBJECT_ADMIN)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE admins SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admins SET locked_until = $2, failed_login_count = 0 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE admins SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
