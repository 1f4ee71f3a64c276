//! Role-based access control (RBAC) extractors.
//!
//! Public accounts and admins share one token format, so every protected
//! handler names which kind of caller it accepts. Admin extractors check a
//! capability from `marquee_core::roles` rather than a single role name.
//!
//! The token only identifies the caller. Each extractor reloads the account,
//! so deleting, deactivating or demoting it takes effect on the next request
//! rather than when the access token expires.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use marquee_core::error::CoreError;
use marquee_core::roles::{
    can_manage_admins, can_manage_catalog, can_manage_users, can_moderate_comments,
    is_admin_role, ROLE_USER,
};
use marquee_core::types::DbId;
use marquee_db::repositories::{AdminRepo, UserRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a public site account. Admin tokens get 403.
///
/// ```ignore
/// async fn rate(RequireUser(user): RequireUser) -> AppResult<Json<()>> { ... }
/// ```
pub struct RequireUser(pub AuthUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_USER {
            return Err(AppError::Core(CoreError::Forbidden(
                "A user account is required".into(),
            )));
        }
        let account = UserRepo::find_by_id(&state.pool, user.user_id)
            .await?
            .ok_or_else(account_gone)?;
        if !account.is_active {
            return Err(account_deactivated());
        }
        Ok(RequireUser(user))
    }
}

/// An authenticated back-office account.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub admin_id: DbId,
    /// One of `marquee_core::roles::ADMIN_ROLES`.
    pub role: String,
}

/// Resolve the caller as an admin holding `capability`, or reject.
async fn admin_with(
    parts: &mut Parts,
    state: &AppState,
    capability: fn(&str) -> bool,
    denied: &str,
) -> Result<AdminUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !is_admin_role(&user.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "An admin account is required".into(),
        )));
    }

    let admin = AdminRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(account_gone)?;
    if !admin.is_active {
        return Err(account_deactivated());
    }
    if !capability(&admin.role) {
        return Err(AppError::Core(CoreError::Forbidden(denied.to_string())));
    }
    Ok(AdminUser {
        admin_id: admin.id,
        role: admin.role,
    })
}

fn account_gone() -> AppError {
    AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
}

fn account_deactivated() -> AppError {
    AppError::Core(CoreError::Forbidden("Account is deactivated".into()))
}

/// Any admin role.
pub struct RequireAdmin(pub AdminUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_with(parts, state, is_admin_role, "An admin account is required")
            .await
            .map(RequireAdmin)
    }
}

/// `super_admin` only: admin account management.
pub struct RequireSuperAdmin(pub AdminUser);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_with(parts, state, can_manage_admins, "Super admin role required")
            .await
            .map(RequireSuperAdmin)
    }
}

/// `super_admin` or `admin`: movies, persons, genres, news, quizzes, sections.
pub struct RequireCatalogManager(pub AdminUser);

impl FromRequestParts<AppState> for RequireCatalogManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_with(
            parts,
            state,
            can_manage_catalog,
            "Catalog management requires the admin or super admin role",
        )
        .await
        .map(RequireCatalogManager)
    }
}

/// `super_admin` or `admin`: public account administration.
pub struct RequireUserManager(pub AdminUser);

impl FromRequestParts<AppState> for RequireUserManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_with(
            parts,
            state,
            can_manage_users,
            "User management requires the admin or super admin role",
        )
        .await
        .map(RequireUserManager)
    }
}

/// Any admin role: comment moderation.
pub struct RequireModerator(pub AdminUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        admin_with(
            parts,
            state,
            can_moderate_comments,
            "Comment moderation requires an admin role",
        )
        .await
        .map(RequireModerator)
    }
}
