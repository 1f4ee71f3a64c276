//! Back-office authentication: login, refresh, logout and `/admin/me`.
//!
//! Mirrors the public flow in [`super::auth`] against the `admins` table.
//! Admin sessions are stored with `subject_kind = 'admin'`, so a refresh
//! token from one side can never be redeemed on the other.

use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use marquee_core::error::CoreError;
use marquee_db::models::admin::AdminResponse;
use marquee_db::models::session::SUBJECT_ADMIN;
use marquee_db::repositories::{AdminRepo, SessionRepo};
use serde::Serialize;

use crate::auth::password::verify_password;
use crate::auth::session::{
    consume_refresh_token, ensure_can_log_in, invalid_credentials, issue_tokens, lock_deadline,
    TokenPair,
};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::handlers::auth::{LoginRequest, RefreshRequest};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Successful authentication response for admin accounts.
#[derive(Debug, Serialize)]
pub struct AdminAuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub admin: AdminResponse,
}

/// POST /api/v1/admin/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AdminAuthResponse>> {
    let admin = AdminRepo::find_by_login(&state.pool, input.login.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let now = Utc::now();
    ensure_can_log_in(admin.is_active, admin.locked_until, now)?;

    let valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !valid {
        let failures = AdminRepo::increment_failed_login(&state.pool, admin.id).await?;
        if let Some(until) = lock_deadline(failures, now) {
            AdminRepo::lock_account(&state.pool, admin.id, until).await?;
            tracing::warn!(admin_id = admin.id, "Admin account locked after repeated failures");
        }
        return Err(invalid_credentials());
    }

    AdminRepo::record_successful_login(&state.pool, admin.id).await?;
    tracing::info!(admin_id = admin.id, role = %admin.role, "Admin logged in");

    let tokens = issue_tokens(&state, SUBJECT_ADMIN, admin.id, &admin.role).await?;
    Ok(Json(AdminAuthResponse {
        tokens,
        admin: admin.into(),
    }))
}

/// POST /api/v1/admin/auth/refresh
///
/// The new access token carries the admin's current role, so role changes
/// take effect at the next refresh.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AdminAuthResponse>> {
    let admin_id = consume_refresh_token(&state, SUBJECT_ADMIN, &input.refresh_token).await?;

    let admin = AdminRepo::find_by_id(&state.pool, admin_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Admin no longer exists".into())))?;

    if !admin.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let tokens = issue_tokens(&state, SUBJECT_ADMIN, admin.id, &admin.role).await?;
    Ok(Json(AdminAuthResponse {
        tokens,
        admin: admin.into(),
    }))
}

/// POST /api/v1/admin/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<StatusCode> {
    let revoked =
        SessionRepo::revoke_all_for_subject(&state.pool, SUBJECT_ADMIN, admin.admin_id).await?;
    tracing::info!(admin_id = admin.admin_id, revoked, "Admin logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/me
pub async fn me(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<AdminResponse>>> {
    let row = AdminRepo::find_by_id(&state.pool, admin.admin_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Admin",
            id: admin.admin_id,
        })?;
    Ok(Json(DataResponse { data: row.into() }))
}
