//! Handlers for the public `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use marquee_core::error::CoreError;
use marquee_core::roles::ROLE_USER;
use marquee_db::models::session::SUBJECT_USER;
use marquee_db::models::user::{CreateUser, UserResponse};
use marquee_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::session::{
    consume_refresh_token, ensure_can_log_in, invalid_credentials, issue_tokens, lock_deadline,
    TokenPair,
};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 30, message = "must be between 3 and 30 characters"),
        custom(function = "validate_username_chars")
    )]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub display_name: Option<String>,
}

/// Request body for `POST /auth/login`. `login` accepts a username or an email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    pub login: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response for public accounts.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserResponse,
}

/// Usernames are ASCII letters, digits, `_`, `.` and `-`.
pub(crate) fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_chars");
        err.message = Some("may only contain letters, digits, '_', '.' and '-'".into());
        Err(err)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a public account and log it in. Returns 201 with tokens.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username.trim().to_string(),
        email: input.email.trim().to_ascii_lowercase(),
        password_hash,
        display_name: input.display_name.map(|d| d.trim().to_string()),
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let tokens = issue_tokens(&state, SUBJECT_USER, user.id, ROLE_USER).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            tokens,
            user: user.into(),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username (or email) and password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_login(&state.pool, input.login.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let now = Utc::now();
    ensure_can_log_in(user.is_active, user.locked_until, now)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !valid {
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if let Some(until) = lock_deadline(failures, now) {
            UserRepo::lock_account(&state.pool, user.id, until).await?;
            tracing::warn!(user_id = user.id, "User account locked after repeated failures");
        }
        return Err(invalid_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let tokens = issue_tokens(&state, SUBJECT_USER, user.id, ROLE_USER).await?;
    Ok(Json(AuthResponse {
        tokens,
        user: user.into(),
    }))
}

/// POST /api/v1/auth/refresh
///
/// Rotate a refresh token: the old one is revoked, a new pair is returned.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user_id = consume_refresh_token(&state, SUBJECT_USER, &input.refresh_token).await?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let tokens = issue_tokens(&state, SUBJECT_USER, user.id, ROLE_USER).await?;
    Ok(Json(AuthResponse {
        tokens,
        user: user.into(),
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> AppResult<StatusCode> {
    let revoked =
        SessionRepo::revoke_all_for_subject(&state.pool, SUBJECT_USER, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}
