//! Handlers for `/admin/users` (public account administration).

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::error::CoreError;
use marquee_core::search::like_pattern;
use marquee_core::types::DbId;
use marquee_db::models::session::SUBJECT_USER;
use marquee_db::models::user::{UpdateUser, UserResponse};
use marquee_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::handlers::auth::validate_username_chars;
use crate::middleware::rbac::RequireUserManager;
use crate::query::{resolve_page, SearchParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(
        length(min = 3, max = 30, message = "must be between 3 and 30 characters"),
        custom(function = "validate_username_chars")
    )]
    pub username: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub display_name: Option<String>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub bio: Option<String>,
    pub is_active: Option<bool>,
}

/// GET /api/v1/admin/users?q=&limit=&offset=
///
/// `q` matches username, email or display name.
pub async fn list_users(
    State(state): State<AppState>,
    RequireUserManager(_admin): RequireUserManager,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<PageResponse<UserResponse>>> {
    let (limit, offset) = resolve_page(params.limit, params.offset);
    let pattern = params.q.as_deref().and_then(like_pattern);

    let users = UserRepo::list(&state.pool, pattern.as_deref(), limit, offset).await?;
    let total = UserRepo::count(&state.pool, pattern.as_deref()).await?;

    Ok(Json(PageResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireUserManager(_admin): RequireUserManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Deactivating an account also ends all of its sessions.
pub async fn update_user(
    State(state): State<AppState>,
    RequireUserManager(admin): RequireUserManager,
    Path(id): Path<DbId>,
    Json(input): Json<AdminUpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    let update = UpdateUser {
        username: input.username.map(|u| u.trim().to_string()),
        email: input.email.map(|e| e.trim().to_ascii_lowercase()),
        display_name: input.display_name.map(|d| d.trim().to_string()),
        bio: input.bio,
        is_active: input.is_active,
        ..Default::default()
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    if input.is_active == Some(false) {
        SessionRepo::revoke_all_for_subject(&state.pool, SUBJECT_USER, id).await?;
    }

    tracing::info!(user_id = id, admin_id = admin.admin_id, "User updated by admin");
    Ok(Json(DataResponse { data: user.into() }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Removes the account with its ratings, list entries, comments and likes.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUserManager(admin): RequireUserManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "User", id }.into());
    }
    tracing::info!(user_id = id, admin_id = admin.admin_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
