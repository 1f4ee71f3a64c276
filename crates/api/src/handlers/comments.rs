//! Comment thread handlers: listing, posting, editing and likes.

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::comments::{
    resolve_comment_sort, thread_root, validate_comment_content, ParentRef,
};
use marquee_core::error::CoreError;
use marquee_core::types::DbId;
use marquee_db::models::comment::{
    Comment, CommentListParams, CommentView, CreateComment, LikeState,
};
use marquee_db::repositories::CommentRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::handlers::me::ensure_movie_exists;
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::RequireUser;
use crate::query::{resolve_page, PaginationParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `POST /movies/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    pub content: String,
    /// Reply target. Replies to replies attach to the thread root.
    pub parent_id: Option<DbId>,
}

/// Request body for `PUT /comments/{id}`.
#[derive(Debug, Deserialize)]
pub struct EditCommentRequest {
    pub content: String,
}

/// Load a comment that is still visible, i.e. not deleted by its author.
async fn find_live(state: &AppState, id: DbId) -> AppResult<Comment> {
    CommentRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.deleted_at.is_none())
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Comment",
                id,
            }
            .into()
        })
}

/// Load a comment and check the caller wrote it.
async fn find_own(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Comment> {
    let comment = find_live(state, id).await?;
    if comment.user_id != user_id {
        return Err(CoreError::Forbidden("Only the author can change this comment".into()).into());
    }
    Ok(comment)
}

async fn view(state: &AppState, id: DbId, viewer: Option<DbId>) -> AppResult<CommentView> {
    CommentRepo::find_view(&state.pool, id, viewer)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Comment",
                id,
            }
            .into()
        })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/{id}/comments?sort=&limit=&offset=
///
/// Top-level comments only. Censored comments keep their place in the
/// thread with `content: null` and the reason code.
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(movie_id): Path<DbId>,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<PageResponse<CommentView>>> {
    let sort = resolve_comment_sort(params.sort.as_deref()).map_err(CoreError::Validation)?;
    let (limit, offset) = resolve_page(params.limit, params.offset);
    ensure_movie_exists(&state, movie_id).await?;

    let comments = CommentRepo::list_for_movie(
        &state.pool,
        movie_id,
        viewer.user_id(),
        sort,
        limit,
        offset,
    )
    .await?;
    let total = CommentRepo::count_for_movie(&state.pool, movie_id).await?;

    Ok(Json(PageResponse {
        data: comments,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/comments/{id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<CommentView>>> {
    let (limit, offset) = params.resolve();
    find_live(&state, id).await?;

    let replies =
        CommentRepo::list_replies(&state.pool, id, viewer.user_id(), limit, offset).await?;
    let total = CommentRepo::count_replies(&state.pool, id).await?;

    Ok(Json(PageResponse {
        data: replies,
        total,
        limit,
        offset,
    }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/movies/{id}/comments
pub async fn post_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(movie_id): Path<DbId>,
    Json(input): Json<PostCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentView>>)> {
    let content = validate_comment_content(&input.content).map_err(CoreError::Validation)?;
    ensure_movie_exists(&state, movie_id).await?;

    let parent_id = match input.parent_id {
        Some(parent_id) => {
            let parent = find_live(&state, parent_id).await?;
            let root = thread_root(
                movie_id,
                ParentRef {
                    id: parent.id,
                    movie_id: parent.movie_id,
                    parent_id: parent.parent_id,
                },
            )
            .map_err(CoreError::Validation)?;
            Some(root)
        }
        None => None,
    };

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            movie_id,
            user_id: user.user_id,
            parent_id,
            content,
        },
    )
    .await?;

    tracing::info!(
        comment_id = comment.id,
        movie_id,
        user_id = user.user_id,
        parent_id = ?parent_id,
        "Comment posted",
    );

    let posted = view(&state, comment.id, Some(user.user_id)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: posted })))
}

/// PUT /api/v1/comments/{id}
///
/// Author only. Censored comments stay frozen until a moderator lifts the
/// censorship.
pub async fn edit_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
    Json(input): Json<EditCommentRequest>,
) -> AppResult<Json<DataResponse<CommentView>>> {
    let comment = find_own(&state, id, user.user_id).await?;
    if comment.is_censored {
        return Err(CoreError::validation("A censored comment cannot be edited").into());
    }
    let content = validate_comment_content(&input.content).map_err(CoreError::Validation)?;

    CommentRepo::update_content(&state.pool, id, &content)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id,
        })?;

    tracing::info!(comment_id = id, user_id = user.user_id, "Comment edited");
    let edited = view(&state, id, Some(user.user_id)).await?;
    Ok(Json(DataResponse { data: edited }))
}

/// DELETE /api/v1/comments/{id}
///
/// Author only. The row is kept for moderation history but disappears from
/// every public listing.
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_own(&state, id, user.user_id).await?;
    CommentRepo::soft_delete(&state.pool, id).await?;

    tracing::info!(comment_id = id, user_id = user.user_id, "Comment deleted by author");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// PUT /api/v1/comments/{id}/like
///
/// Idempotent.
pub async fn like_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeState>>> {
    find_live(&state, id).await?;
    let like = CommentRepo::like(&state.pool, id, user.user_id).await?;
    tracing::debug!(comment_id = id, user_id = user.user_id, "Comment liked");
    Ok(Json(DataResponse { data: like }))
}

/// DELETE /api/v1/comments/{id}/like
pub async fn unlike_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeState>>> {
    find_live(&state, id).await?;
    let like = CommentRepo::unlike(&state.pool, id, user.user_id).await?;
    tracing::debug!(comment_id = id, user_id = user.user_id, "Comment unliked");
    Ok(Json(DataResponse { data: like }))
}
