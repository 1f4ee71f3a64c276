//! Login policy and token issuance shared by `/auth` and `/admin/auth`.

use chrono::{Duration, Utc};
use marquee_core::error::CoreError;
use marquee_core::types::{DbId, Timestamp};
use marquee_db::models::session::CreateSession;
use marquee_db::repositories::SessionRepo;
use serde::Serialize;

use crate::auth::jwt::{generate_access_token, RefreshToken};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Consecutive failed logins that trigger a lock.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// How long a locked account stays locked.
pub const LOCK_DURATION_MINS: i64 = 15;

/// Access and refresh token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Reject deactivated or currently locked accounts.
pub fn ensure_can_log_in(
    is_active: bool,
    locked_until: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    if !is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()));
    }
    if locked_until.is_some_and(|until| until > now) {
        return Err(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        ));
    }
    Ok(())
}

/// Lock deadline once `failures` consecutive failures reach the threshold.
pub fn lock_deadline(failures: i32, now: Timestamp) -> Option<Timestamp> {
    if failures >= MAX_FAILED_ATTEMPTS {
        Some(now + Duration::minutes(LOCK_DURATION_MINS))
    } else {
        None
    }
}

/// The error every bad-credential path returns, so callers cannot discover
/// which half of the pair was wrong.
pub fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// Sign an access token, persist a refresh session, and return both.
pub async fn issue_tokens(
    state: &AppState,
    subject_kind: &'static str,
    subject_id: DbId,
    role: &str,
) -> AppResult<TokenPair> {
    let access_token = generate_access_token(subject_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = RefreshToken::generate();
    let session = CreateSession {
        subject_kind,
        subject_id,
        refresh_token_hash: refresh.hash,
        expires_at: Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days),
    };
    SessionRepo::create(&state.pool, &session).await?;

    Ok(TokenPair {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: state.config.jwt.access_token_ttl_secs(),
    })
}

/// Consume a refresh token of the given kind, returning the session's subject.
///
/// The session is revoked on use. A token that was already rotated away
/// (including by a concurrent request) is rejected.
pub async fn consume_refresh_token(
    state: &AppState,
    subject_kind: &'static str,
    refresh_token: &str,
) -> AppResult<DbId> {
    let hash = crate::auth::jwt::hash_refresh_token(refresh_token);
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let session = SessionRepo::find_active_by_hash(&state.pool, subject_kind, &hash)
        .await?
        .ok_or_else(invalid)?;

    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(invalid());
    }
    Ok(session.subject_id)
}
