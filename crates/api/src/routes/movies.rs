//! Route definitions for `/movies`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{comments, movies};
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /                  -> list_movies
/// GET    /new-releases      -> new_releases
/// GET    /top-rated         -> top_rated
/// GET    /{id}              -> get_movie (optional user token)
/// PUT    /{id}/rating       -> rate_movie (requires user)
/// DELETE /{id}/rating       -> unrate_movie (requires user)
/// GET    /{id}/comments     -> list_comments (optional user token)
/// POST   /{id}/comments     -> post_comment (requires user)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies))
        .route("/new-releases", get(movies::new_releases))
        .route("/top-rated", get(movies::top_rated))
        .route("/{id}", get(movies::get_movie))
        .route(
            "/{id}/rating",
            put(movies::rate_movie).delete(movies::unrate_movie),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::post_comment),
        )
}
