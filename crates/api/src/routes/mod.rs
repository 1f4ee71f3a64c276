pub mod admin;
pub mod auth;
pub mod catalog;
pub mod comments;
pub mod editorial;
pub mod health;
pub mod me;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh, /auth/logout
///
/// /me                                     profile (user)
/// /me/password                            change password (user)
/// /me/lists                               list entries (user)
/// /me/lists/{list_type}/{movie_id}        add, remove (user)
///
/// /movies                                 browse (?q, genre_id, year, sort)
/// /movies/new-releases                    last 90 days
/// /movies/top-rated                       ?min_votes
/// /movies/{id}                            details (+ my_rating, my_lists)
/// /movies/{id}/rating                     rate, unrate (user)
/// /movies/{id}/comments                   list, post
///
/// /comments/{id}                          edit, delete (author)
/// /comments/{id}/replies                  list
/// /comments/{id}/like                     like, unlike (user)
///
/// /genres                                 list with movie counts
/// /persons, /persons/{id}                 browse, details with filmography
///
/// /news, /news/{slug}                     published articles
/// /quizzes, /quizzes/{id}                 published quizzes (no answers)
/// /quizzes/{id}/attempts                  submit (user)
/// /recommendations, /recommendations/{slug}  active sections
///
/// /admin/...                              see [`admin::router`]
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", me::router())
        .nest("/movies", movies::router())
        .nest("/comments", comments::router())
        .nest("/genres", catalog::genre_router())
        .nest("/persons", catalog::person_router())
        .nest("/news", editorial::news_router())
        .nest("/quizzes", editorial::quiz_router())
        .nest("/recommendations", editorial::recommendation_router())
        .nest("/admin", admin::router())
}
