//! Comment moderation: queue, censor, uncensor and hard delete.

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::error::CoreError;
use marquee_core::moderation::{validate_censor, validate_uncensor};
use marquee_core::search::like_pattern;
use marquee_core::types::DbId;
use marquee_db::models::comment::{Comment, ModerationComment, ModerationListParams};
use marquee_db::repositories::{CommentRepo, ModerationFilter};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireModerator;
use crate::query::resolve_page;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `POST /admin/comments/{id}/censor`.
#[derive(Debug, Deserialize)]
pub struct CensorRequest {
    /// One of the `CensorReason` codes, e.g. `SPOILER`.
    pub reason: Option<String>,
}

async fn find_comment(state: &AppState, id: DbId) -> AppResult<Comment> {
    CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Comment", id }.into())
}

/// GET /api/v1/admin/comments?movie_id=&user_id=&censored=&q=&include_deleted=
///
/// Full content is shown regardless of censorship.
pub async fn list_comments(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
    Query(params): Query<ModerationListParams>,
) -> AppResult<Json<PageResponse<ModerationComment>>> {
    let (limit, offset) = resolve_page(params.limit, params.offset);
    let filter = ModerationFilter {
        movie_id: params.movie_id,
        user_id: params.user_id,
        censored: params.censored,
        pattern: params.q.as_deref().and_then(like_pattern),
        include_deleted: params.include_deleted,
    };

    let comments = CommentRepo::moderation_list(&state.pool, &filter, limit, offset).await?;
    let total = CommentRepo::moderation_count(&state.pool, &filter).await?;

    Ok(Json(PageResponse {
        data: comments,
        total,
        limit,
        offset,
    }))
}

/// POST /api/v1/admin/comments/{id}/censor
///
/// Censoring an already censored comment with a new reason replaces the
/// reason. Repeating the current reason changes nothing.
pub async fn censor_comment(
    State(state): State<AppState>,
    RequireModerator(admin): RequireModerator,
    Path(id): Path<DbId>,
    Json(input): Json<CensorRequest>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let reason = validate_censor(input.reason.as_deref()).map_err(CoreError::Validation)?;
    let comment = find_comment(&state, id).await?;

    if comment.is_censored && comment.censor_reason.as_deref() == Some(reason.as_str()) {
        return Ok(Json(DataResponse { data: comment }));
    }

    let censored = CommentRepo::censor(&state.pool, id, reason.as_str(), admin.admin_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Comment", id })?;

    tracing::info!(
        comment_id = id,
        admin_id = admin.admin_id,
        reason = reason.as_str(),
        "Comment censored",
    );
    Ok(Json(DataResponse { data: censored }))
}

/// POST /api/v1/admin/comments/{id}/uncensor
pub async fn uncensor_comment(
    State(state): State<AppState>,
    RequireModerator(admin): RequireModerator,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = find_comment(&state, id).await?;
    validate_uncensor(comment.is_censored).map_err(CoreError::Validation)?;

    let restored = CommentRepo::uncensor(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Comment", id })?;

    tracing::info!(comment_id = id, admin_id = admin.admin_id, "Comment uncensored");
    Ok(Json(DataResponse { data: restored }))
}

/// DELETE /api/v1/admin/comments/{id}
///
/// Permanent. Replies and likes are removed with the comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireModerator(admin): RequireModerator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CommentRepo::hard_delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Comment", id }.into());
    }
    tracing::info!(comment_id = id, admin_id = admin.admin_id, "Comment deleted by moderator");
    Ok(StatusCode::NO_CONTENT)
}
