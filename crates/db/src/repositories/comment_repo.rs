//! Repository for the `comments` and `comment_likes` tables.

use marquee_core::comments::{SORT_OLDEST, SORT_TOP};
use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentView, CreateComment, LikeState, ModerationComment};

const COLUMNS: &str = "id, movie_id, user_id, parent_id, content, is_censored, censor_reason, \
                       censored_by, censored_at, edited_at, deleted_at, created_at, updated_at";

/// Public projection. `$1` is the viewing user's id (or NULL for anonymous).
///
/// Censored content is blanked here so it never leaves the database for
/// public callers.
const VIEW_SELECT: &str = "\
    SELECT c.id, c.movie_id, c.parent_id, c.user_id, \
           u.username, u.display_name, u.avatar_url, \
           CASE WHEN c.is_censored THEN NULL ELSE c.content END AS content, \
           c.is_censored, c.censor_reason, c.edited_at, c.created_at, \
           (SELECT COUNT(*) FROM comment_likes cl WHERE cl.comment_id = c.id) AS like_count, \
           (SELECT COUNT(*) FROM comments r \
             WHERE r.parent_id = c.id AND r.deleted_at IS NULL) AS reply_count, \
           ($1::BIGINT IS NOT NULL AND EXISTS ( \
               SELECT 1 FROM comment_likes cl \
               WHERE cl.comment_id = c.id AND cl.user_id = $1)) AS liked_by_me \
    FROM comments c \
    JOIN users u ON u.id = c.user_id";

/// Shared filter for the moderation queue.
const MODERATION_FILTER: &str = "\
    WHERE ($1::BIGINT IS NULL OR c.movie_id = $1) \
      AND ($2::BIGINT IS NULL OR c.user_id = $2) \
      AND ($3::BOOLEAN IS NULL OR c.is_censored = $3) \
      AND ($4::TEXT IS NULL OR c.content ILIKE $4) \
      AND ($5::BOOLEAN OR c.deleted_at IS NULL)";

/// Resolved moderation queue filter.
#[derive(Debug, Clone, Default)]
pub struct ModerationFilter {
    pub movie_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub censored: Option<bool>,
    pub pattern: Option<String>,
    pub include_deleted: bool,
}

fn order_by(sort: &str) -> &'static str {
    match sort {
        SORT_OLDEST => "c.created_at ASC, c.id ASC",
        SORT_TOP => "like_count DESC, c.created_at DESC, c.id DESC",
        _ => "c.created_at DESC, c.id DESC",
    }
}

/// Provides comment threads, likes and moderation actions.
pub struct CommentRepo;

impl CommentRepo {
    // -----------------------------------------------------------------------
    // Authoring
    // -----------------------------------------------------------------------

    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (movie_id, user_id, parent_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.movie_id)
            .bind(input.user_id)
            .bind(input.parent_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by id, including soft-deleted ones.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a comment's content and stamp `edited_at`. Soft-deleted
    /// comments are not editable.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET content = $2, edited_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Author deletion: hide the comment but keep the row.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE comments SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Moderator deletion: remove the row, its replies and likes.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Public reads
    // -----------------------------------------------------------------------

    /// A single visible comment as seen by `viewer`.
    pub async fn find_view(
        pool: &PgPool,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<CommentView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE c.id = $2 AND c.deleted_at IS NULL");
        sqlx::query_as::<_, CommentView>(&query)
            .bind(viewer)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Top-level comments on a movie.
    ///
    /// `sort` is one of the keys accepted by
    /// [`marquee_core::comments::resolve_comment_sort`].
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
        viewer: Option<DbId>,
        sort: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT}
             WHERE c.movie_id = $2 AND c.parent_id IS NULL AND c.deleted_at IS NULL
             ORDER BY {}
             LIMIT $3 OFFSET $4",
            order_by(sort)
        );
        sqlx::query_as::<_, CommentView>(&query)
            .bind(viewer)
            .bind(movie_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_movie(pool: &PgPool, movie_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments
             WHERE movie_id = $1 AND parent_id IS NULL AND deleted_at IS NULL",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await
    }

    /// Replies to a thread root, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        parent_id: DbId,
        viewer: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT}
             WHERE c.parent_id = $2 AND c.deleted_at IS NULL
             ORDER BY c.created_at ASC, c.id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, CommentView>(&query)
            .bind(viewer)
            .bind(parent_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_replies(pool: &PgPool, parent_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE parent_id = $1 AND deleted_at IS NULL",
        )
        .bind(parent_id)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Likes
    // -----------------------------------------------------------------------

    /// Like a comment. Idempotent.
    pub async fn like(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
    ) -> Result<LikeState, sqlx::Error> {
        sqlx::query(
            "INSERT INTO comment_likes (comment_id, user_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_comment_likes_entry DO NOTHING",
        )
        .bind(comment_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Self::like_state(pool, comment_id, true).await
    }

    /// Remove a like. Idempotent.
    pub async fn unlike(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
    ) -> Result<LikeState, sqlx::Error> {
        sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND user_id = $2")
            .bind(comment_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Self::like_state(pool, comment_id, false).await
    }

    async fn like_state(
        pool: &PgPool,
        comment_id: DbId,
        liked: bool,
    ) -> Result<LikeState, sqlx::Error> {
        let like_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comment_likes WHERE comment_id = $1")
                .bind(comment_id)
                .fetch_one(pool)
                .await?;
        Ok(LikeState {
            comment_id,
            liked,
            like_count,
        })
    }

    // -----------------------------------------------------------------------
    // Moderation
    // -----------------------------------------------------------------------

    /// Censor (or re-censor with a new reason) a comment.
    pub async fn censor(
        pool: &PgPool,
        id: DbId,
        reason: &str,
        admin_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET
                is_censored = TRUE,
                censor_reason = $2,
                censored_by = $3,
                censored_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(reason)
            .bind(admin_id)
            .fetch_optional(pool)
            .await
    }

    /// Lift censorship, clearing the reason and moderator stamp.
    pub async fn uncensor(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET
                is_censored = FALSE,
                censor_reason = NULL,
                censored_by = NULL,
                censored_at = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Moderation queue, newest first, with full content.
    pub async fn moderation_list(
        pool: &PgPool,
        filter: &ModerationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ModerationComment>, sqlx::Error> {
        let query = format!(
            "SELECT c.id, c.movie_id, m.title AS movie_title, c.parent_id, c.user_id,
                    u.username, c.content, c.is_censored, c.censor_reason,
                    c.censored_by, c.censored_at, c.deleted_at, c.created_at,
                    (SELECT COUNT(*) FROM comment_likes cl WHERE cl.comment_id = c.id) AS like_count
             FROM comments c
             JOIN movies m ON m.id = c.movie_id
             JOIN users u ON u.id = c.user_id
             {MODERATION_FILTER}
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, ModerationComment>(&query)
            .bind(filter.movie_id)
            .bind(filter.user_id)
            .bind(filter.censored)
            .bind(&filter.pattern)
            .bind(filter.include_deleted)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn moderation_count(
        pool: &PgPool,
        filter: &ModerationFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM comments c {MODERATION_FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.movie_id)
            .bind(filter.user_id)
            .bind(filter.censored)
            .bind(&filter.pattern)
            .bind(filter.include_deleted)
            .fetch_one(pool)
            .await
    }
}
