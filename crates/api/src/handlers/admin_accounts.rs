//! Handlers for `/admin/admins` (back-office account management).
//!
//! All handlers require the super admin role via [`RequireSuperAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::error::CoreError;
use marquee_core::roles::{parse_admin_role, ROLE_SUPER_ADMIN};
use marquee_core::types::DbId;
use marquee_db::models::admin::{Admin, AdminResponse, CreateAdmin, UpdateAdmin};
use marquee_db::models::session::SUBJECT_ADMIN;
use marquee_db::repositories::{AdminRepo, SessionRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::handlers::auth::validate_username_chars;
use crate::middleware::rbac::RequireSuperAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/admins`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(
        length(min = 3, max = 30, message = "must be between 3 and 30 characters"),
        custom(function = "validate_username_chars")
    )]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
    /// `super_admin`, `admin` or `content_moderator` (any case).
    pub role: String,
}

/// Request body for `PUT /admin/admins/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAdminRequest {
    #[validate(
        length(min = 3, max = 30, message = "must be between 3 and 30 characters"),
        custom(function = "validate_username_chars")
    )]
    pub username: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/admins/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// What a mutation would do to the target account.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminChange<'a> {
    pub delete: bool,
    pub deactivate: bool,
    pub new_role: Option<&'a str>,
}

impl AdminChange<'_> {
    fn changes_role(&self, current: &str) -> bool {
        self.new_role.is_some_and(|r| r != current)
    }

    /// Whether the target would stop being an active super admin.
    fn removes_super_admin(&self, target: &Admin) -> bool {
        target.is_active
            && target.role == ROLE_SUPER_ADMIN
            && (self.delete || self.deactivate || self.changes_role(&target.role))
    }
}

/// Reject changes an admin may not make to themselves, and any change that
/// would leave no active super admin.
pub fn check_admin_change(
    actor_id: DbId,
    target: &Admin,
    change: AdminChange<'_>,
    active_super_admins: i64,
) -> Result<(), CoreError> {
    if actor_id == target.id {
        if change.delete {
            return Err(CoreError::Forbidden("You cannot delete your own account".into()));
        }
        if change.deactivate {
            return Err(CoreError::Forbidden(
                "You cannot deactivate your own account".into(),
            ));
        }
        if change.changes_role(&target.role) {
            return Err(CoreError::Forbidden("You cannot change your own role".into()));
        }
    }
    if change.removes_super_admin(target) && active_super_admins <= 1 {
        return Err(CoreError::Conflict(
            "The last active super admin cannot be removed, deactivated or demoted".into(),
        ));
    }
    Ok(())
}

async fn find_admin(state: &AppState, id: DbId) -> AppResult<Admin> {
    AdminRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Admin", id }.into())
}

/// Closure for [`AdminRepo::update_checked`] / [`AdminRepo::delete_checked`]
/// applying [`check_admin_change`] to the locked target row.
fn approve(
    actor_id: DbId,
    change: AdminChange<'_>,
) -> impl FnOnce(&Admin, i64) -> AppResult<()> + '_ {
    move |target, active_super_admins| {
        check_admin_change(actor_id, target, change, active_super_admins)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/admins
pub async fn list_admins(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> AppResult<Json<DataResponse<Vec<AdminResponse>>>> {
    let admins = AdminRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: admins.into_iter().map(AdminResponse::from).collect(),
    }))
}

/// POST /api/v1/admin/admins
pub async fn create_admin(
    State(state): State<AppState>,
    RequireSuperAdmin(actor): RequireSuperAdmin,
    Json(input): Json<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AdminResponse>>)> {
    input.validate()?;
    let role = parse_admin_role(&input.role).map_err(CoreError::Validation)?;
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = AdminRepo::create(
        &state.pool,
        &CreateAdmin {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_ascii_lowercase(),
            password_hash,
            role: role.to_string(),
        },
    )
    .await?;

    tracing::info!(
        admin_id = admin.id,
        role,
        created_by = actor.admin_id,
        "Admin account created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: admin.into() })))
}

/// GET /api/v1/admin/admins/{id}
pub async fn get_admin(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AdminResponse>>> {
    let admin = find_admin(&state, id).await?;
    Ok(Json(DataResponse { data: admin.into() }))
}

/// PUT /api/v1/admin/admins/{id}
pub async fn update_admin(
    State(state): State<AppState>,
    RequireSuperAdmin(actor): RequireSuperAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdminRequest>,
) -> AppResult<Json<DataResponse<AdminResponse>>> {
    input.validate()?;
    let role = input
        .role
        .as_deref()
        .map(parse_admin_role)
        .transpose()
        .map_err(CoreError::Validation)?;

    let change = AdminChange {
        deactivate: input.is_active == Some(false),
        new_role: role,
        ..Default::default()
    };
    let update = UpdateAdmin {
        username: input.username.map(|u| u.trim().to_string()),
        email: input.email.map(|e| e.trim().to_ascii_lowercase()),
        role: role.map(str::to_string),
        is_active: input.is_active,
    };
    let approval = approve(actor.admin_id, change);
    let admin = AdminRepo::update_checked(&state.pool, id, &update, approval)
        .await?
        .ok_or(CoreError::NotFound { entity: "Admin", id })?;

    if input.is_active == Some(false) {
        SessionRepo::revoke_all_for_subject(&state.pool, SUBJECT_ADMIN, id).await?;
    }

    tracing::info!(
        admin_id = id,
        updated_by = actor.admin_id,
        role = %admin.role,
        "Admin account updated",
    );
    Ok(Json(DataResponse { data: admin.into() }))
}

/// DELETE /api/v1/admin/admins/{id}
pub async fn delete_admin(
    State(state): State<AppState>,
    RequireSuperAdmin(actor): RequireSuperAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let change = AdminChange {
        delete: true,
        ..Default::default()
    };
    if !AdminRepo::delete_checked(&state.pool, id, approve(actor.admin_id, change)).await? {
        return Err(CoreError::NotFound { entity: "Admin", id }.into());
    }
    tracing::info!(admin_id = id, deleted_by = actor.admin_id, "Admin account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/admins/{id}/reset-password
///
/// Sets a new password and signs the account out everywhere.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireSuperAdmin(actor): RequireSuperAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password).map_err(CoreError::Validation)?;
    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !AdminRepo::update_password(&state.pool, id, &hashed).await? {
        return Err(CoreError::NotFound { entity: "Admin", id }.into());
    }
    SessionRepo::revoke_all_for_subject(&state.pool, SUBJECT_ADMIN, id).await?;

    tracing::info!(admin_id = id, reset_by = actor.admin_id, "Admin password reset");
    Ok(StatusCode::NO_CONTENT)
}
