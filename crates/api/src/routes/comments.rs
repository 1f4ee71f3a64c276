//! Route definitions for `/comments`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// PUT    /{id}          -> edit_comment (author)
/// DELETE /{id}          -> delete_comment (author)
/// GET    /{id}/replies  -> list_replies (optional user token)
/// PUT    /{id}/like     -> like_comment
/// DELETE /{id}/like     -> unlike_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(comments::edit_comment).delete(comments::delete_comment),
        )
        .route("/{id}/replies", get(comments::list_replies))
        .route(
            "/{id}/like",
            put(comments::like_comment).delete(comments::unlike_comment),
        )
}
