//! Route definitions for the caller's own account at `/me`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require a user token.
///
/// ```text
/// GET    /                              -> get_me
/// PUT    /                              -> update_me
/// PUT    /password                      -> change_password
/// GET    /lists                         -> my_lists
/// PUT    /lists/{list_type}/{movie_id}  -> add_to_list
/// DELETE /lists/{list_type}/{movie_id}  -> remove_from_list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_me).put(me::update_me))
        .route("/password", put(me::change_password))
        .route("/lists", get(me::my_lists))
        .route(
            "/lists/{list_type}/{movie_id}",
            put(me::add_to_list).delete(me::remove_from_list),
        )
}
