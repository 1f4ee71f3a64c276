//! Route definitions for the public editorial resources: news, quizzes and
//! recommendation sections.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{news, quizzes, recommendations};
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET /        -> list_news
/// GET /{slug}  -> get_article
/// ```
pub fn news_router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list_news))
        .route("/{slug}", get(news::get_article))
}

/// Routes mounted at `/quizzes`.
///
/// ```text
/// GET  /               -> list_quizzes
/// GET  /{id}           -> get_quiz
/// POST /{id}/attempts  -> submit_attempt (requires user)
/// ```
pub fn quiz_router() -> Router<AppState> {
    Router::new()
        .route("/", get(quizzes::list_quizzes))
        .route("/{id}", get(quizzes::get_quiz))
        .route("/{id}/attempts", post(quizzes::submit_attempt))
}

/// Routes mounted at `/recommendations`.
pub fn recommendation_router() -> Router<AppState> {
    Router::new()
        .route("/", get(recommendations::list_sections))
        .route("/{slug}", get(recommendations::get_section))
}
