//! Comment, like and moderation models and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub movie_id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub content: String,
    pub is_censored: bool,
    pub censor_reason: Option<String>,
    pub censored_by: Option<DbId>,
    pub censored_at: Option<Timestamp>,
    pub edited_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment as rendered on the public site.
///
/// `content` is `None` when the comment is censored; `censor_reason` then
/// says why.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentView {
    pub id: DbId,
    pub movie_id: DbId,
    pub parent_id: Option<DbId>,
    pub user_id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub content: Option<String>,
    pub is_censored: bool,
    pub censor_reason: Option<String>,
    pub edited_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub like_count: i64,
    pub reply_count: i64,
    /// Whether the requesting user liked this comment. Always `false` for anonymous callers.
    pub liked_by_me: bool,
}

/// A comment as listed in the moderation queue (full content, movie and author context).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModerationComment {
    pub id: DbId,
    pub movie_id: DbId,
    pub movie_title: String,
    pub parent_id: Option<DbId>,
    pub user_id: DbId,
    pub username: String,
    pub content: String,
    pub is_censored: bool,
    pub censor_reason: Option<String>,
    pub censored_by: Option<DbId>,
    pub censored_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub like_count: i64,
}

/// Result of a like/unlike toggle.
#[derive(Debug, Clone, Serialize)]
pub struct LikeState {
    pub comment_id: DbId,
    pub liked: bool,
    pub like_count: i64,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

pub struct CreateComment {
    pub movie_id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub content: String,
}

/// Query parameters for `GET /api/v1/movies/{id}/comments` and replies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentListParams {
    /// `newest` (default), `oldest` or `top`.
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /api/v1/admin/comments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationListParams {
    pub movie_id: Option<DbId>,
    pub user_id: Option<DbId>,
    /// `true` for censored only, `false` for visible only, absent for both.
    pub censored: Option<bool>,
    /// Substring match on content.
    pub q: Option<String>,
    /// Include author-deleted comments (default `false`).
    #[serde(default)]
    pub include_deleted: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
