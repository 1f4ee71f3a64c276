//! Route definitions for `/genres` and `/persons`.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/genres`.
pub fn genre_router() -> Router<AppState> {
    Router::new().route("/", get(catalog::list_genres))
}

/// Routes mounted at `/persons`.
///
/// ```text
/// GET /      -> list_persons
/// GET /{id}  -> get_person
/// ```
pub fn person_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_persons))
        .route("/{id}", get(catalog::get_person))
}
