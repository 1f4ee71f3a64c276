//! Handlers for the caller's own account (`/me`) and personal movie lists.

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::error::CoreError;
use marquee_core::types::DbId;
use marquee_core::user_list::ListType;
use marquee_db::models::session::SUBJECT_USER;
use marquee_db::models::user::{UpdateUser, UserResponse};
use marquee_db::models::user_list::ListedMovie;
use marquee_db::repositories::{MovieRepo, SessionRepo, UserListRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /me`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub display_name: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub bio: Option<String>,
}

/// Request body for `PUT /me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Query parameters for `GET /me/lists`.
#[derive(Debug, Deserialize)]
pub struct MyListsParams {
    /// `FAVORITES`, `WATCHLIST` or `WATCHED`; omitted for all lists.
    pub list_type: Option<String>,
}

/// Result of adding or removing a list entry.
#[derive(Debug, Serialize)]
pub struct ListMembership {
    pub movie_id: DbId,
    pub list_type: ListType,
    /// Lists containing the movie after the change.
    pub lists: Vec<ListType>,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/me
pub async fn get_me(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        })?;
    Ok(Json(DataResponse { data: row.into() }))
}

/// PUT /api/v1/me
///
/// Update the caller's profile. Username and activation are not editable here.
pub async fn update_me(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    let update = UpdateUser {
        email: input.email.map(|e| e.trim().to_ascii_lowercase()),
        display_name: input.display_name.map(|d| d.trim().to_string()),
        avatar_url: input.avatar_url,
        bio: input.bio,
        ..Default::default()
    };

    let row = UserRepo::update(&state.pool, user.user_id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        })?;

    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(Json(DataResponse { data: row.into() }))
}

/// PUT /api/v1/me/password
///
/// Change password after re-checking the current one. Every session is
/// revoked so other devices must log in again.
pub async fn change_password(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        })?;

    let valid = verify_password(&input.current_password, &row.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
    }

    validate_password_strength(&input.new_password).map_err(CoreError::Validation)?;
    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::update_password(&state.pool, user.user_id, &hashed).await?;
    SessionRepo::revoke_all_for_subject(&state.pool, SUBJECT_USER, user.user_id).await?;

    tracing::info!(user_id = user.user_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Movie lists
// ---------------------------------------------------------------------------

/// GET /api/v1/me/lists?list_type=
pub async fn my_lists(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<MyListsParams>,
) -> AppResult<Json<DataResponse<Vec<ListedMovie>>>> {
    let list_type = params
        .list_type
        .as_deref()
        .map(ListType::parse)
        .transpose()
        .map_err(CoreError::Validation)?;

    let movies = UserListRepo::list_for_user(&state.pool, user.user_id, list_type).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// PUT /api/v1/me/lists/{list_type}/{movie_id}
///
/// Idempotent. Marking a movie watched also removes it from the watchlist.
pub async fn add_to_list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((list_type, movie_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<ListMembership>>> {
    let list_type = ListType::parse(&list_type).map_err(CoreError::Validation)?;
    ensure_movie_exists(&state, movie_id).await?;

    let added = UserListRepo::add(&state.pool, user.user_id, movie_id, list_type).await?;
    if added {
        tracing::info!(
            user_id = user.user_id,
            movie_id,
            list_type = list_type.as_str(),
            "Movie added to list",
        );
    }

    let lists = UserListRepo::lists_containing(&state.pool, user.user_id, movie_id).await?;
    Ok(Json(DataResponse {
        data: ListMembership {
            movie_id,
            list_type,
            lists,
        },
    }))
}

/// DELETE /api/v1/me/lists/{list_type}/{movie_id}
pub async fn remove_from_list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((list_type, movie_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<ListMembership>>> {
    let list_type = ListType::parse(&list_type).map_err(CoreError::Validation)?;

    let removed = UserListRepo::remove(&state.pool, user.user_id, movie_id, list_type).await?;
    if !removed {
        return Err(CoreError::NotFoundByKey {
            entity: "List entry",
            key: format!("{}/{movie_id}", list_type.as_str()),
        }
        .into());
    }

    let lists = UserListRepo::lists_containing(&state.pool, user.user_id, movie_id).await?;
    Ok(Json(DataResponse {
        data: ListMembership {
            movie_id,
            list_type,
            lists,
        },
    }))
}

pub(crate) async fn ensure_movie_exists(state: &AppState, movie_id: DbId) -> AppResult<()> {
    if MovieRepo::exists(&state.pool, movie_id).await? {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }
        .into())
    }
}
