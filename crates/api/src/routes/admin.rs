//! Route definitions for the `/admin` dashboard API.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    admin_accounts, admin_auth, admin_catalog, admin_comments, admin_news, admin_quizzes,
    admin_recommendations, admin_users, dashboard,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Capabilities are enforced by handler extractors: account management
/// needs a super admin, moderation accepts any admin role, everything else
/// needs the admin or super admin role.
///
/// ```text
/// POST   /auth/login                        -> admin_auth::login
/// POST   /auth/refresh                      -> admin_auth::refresh
/// POST   /auth/logout                       -> admin_auth::logout
/// GET    /me                                -> admin_auth::me
/// GET    /dashboard                         -> dashboard::get_dashboard
///
/// GET    /admins                            -> list_admins
/// POST   /admins                            -> create_admin
/// GET    /admins/{id}                       -> get_admin
/// PUT    /admins/{id}                       -> update_admin
/// DELETE /admins/{id}                       -> delete_admin
/// POST   /admins/{id}/reset-password        -> reset_password
///
/// GET    /users                             -> list_users
/// GET    /users/{id}                        -> get_user
/// PUT    /users/{id}                        -> update_user
/// DELETE /users/{id}                        -> delete_user
///
/// POST   /movies                            -> create_movie
/// PUT    /movies/{id}                       -> update_movie
/// DELETE /movies/{id}                       -> delete_movie
/// PUT    /movies/{id}/genres                -> set_movie_genres
/// PUT    /movies/{id}/credits               -> set_movie_credits
/// POST   /persons                           -> create_person
/// PUT    /persons/{id}                      -> update_person
/// DELETE /persons/{id}                      -> delete_person
/// POST   /genres                            -> create_genre
/// PUT    /genres/{id}                       -> update_genre
/// DELETE /genres/{id}                       -> delete_genre
///
/// GET    /comments                          -> moderation queue
/// POST   /comments/{id}/censor              -> censor_comment
/// POST   /comments/{id}/uncensor            -> uncensor_comment
/// DELETE /comments/{id}                     -> delete_comment
///
/// GET    /recommendations                   -> list_sections
/// POST   /recommendations                   -> create_section
/// GET    /recommendations/{id}              -> get_section
/// PUT    /recommendations/{id}              -> update_section
/// DELETE /recommendations/{id}              -> delete_section
/// POST   /recommendations/{id}/movies       -> add_movie
/// DELETE /recommendations/{id}/movies/{mid} -> remove_movie
/// PUT    /recommendations/{id}/movies/order -> reorder_movies
///
/// GET    /news                              -> list_news (drafts included)
/// POST   /news                              -> create_news
/// GET    /news/{id}                         -> get_news
/// PUT    /news/{id}                         -> update_news
/// DELETE /news/{id}                         -> delete_news
/// POST   /news/{id}/publish                 -> publish_news
/// POST   /news/{id}/unpublish               -> unpublish_news
///
/// GET    /quizzes                           -> list_quizzes
/// POST   /quizzes                           -> create_quiz
/// GET    /quizzes/{id}                      -> get_quiz (with answers)
/// PUT    /quizzes/{id}                      -> update_quiz
/// DELETE /quizzes/{id}                      -> delete_quiz
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Session.
        .route("/auth/login", post(admin_auth::login))
        .route("/auth/refresh", post(admin_auth::refresh))
        .route("/auth/logout", post(admin_auth::logout))
        .route("/me", get(admin_auth::me))
        .route("/dashboard", get(dashboard::get_dashboard))
        // Back-office accounts.
        .route(
            "/admins",
            get(admin_accounts::list_admins).post(admin_accounts::create_admin),
        )
        .route(
            "/admins/{id}",
            get(admin_accounts::get_admin)
                .put(admin_accounts::update_admin)
                .delete(admin_accounts::delete_admin),
        )
        .route(
            "/admins/{id}/reset-password",
            post(admin_accounts::reset_password),
        )
        // Public accounts.
        .route("/users", get(admin_users::list_users))
        .route(
            "/users/{id}",
            get(admin_users::get_user)
                .put(admin_users::update_user)
                .delete(admin_users::delete_user),
        )
        // Catalog.
        .route("/movies", post(admin_catalog::create_movie))
        .route(
            "/movies/{id}",
            put(admin_catalog::update_movie).delete(admin_catalog::delete_movie),
        )
        .route("/movies/{id}/genres", put(admin_catalog::set_movie_genres))
        .route("/movies/{id}/credits", put(admin_catalog::set_movie_credits))
        .route("/persons", post(admin_catalog::create_person))
        .route(
            "/persons/{id}",
            put(admin_catalog::update_person).delete(admin_catalog::delete_person),
        )
        .route("/genres", post(admin_catalog::create_genre))
        .route(
            "/genres/{id}",
            put(admin_catalog::update_genre).delete(admin_catalog::delete_genre),
        )
        // Moderation.
        .route("/comments", get(admin_comments::list_comments))
        .route(
            "/comments/{id}",
            axum::routing::delete(admin_comments::delete_comment),
        )
        .route("/comments/{id}/censor", post(admin_comments::censor_comment))
        .route(
            "/comments/{id}/uncensor",
            post(admin_comments::uncensor_comment),
        )
        // Recommendation curation.
        .route(
            "/recommendations",
            get(admin_recommendations::list_sections).post(admin_recommendations::create_section),
        )
        .route(
            "/recommendations/{id}",
            get(admin_recommendations::get_section)
                .put(admin_recommendations::update_section)
                .delete(admin_recommendations::delete_section),
        )
        .route(
            "/recommendations/{id}/movies",
            post(admin_recommendations::add_movie),
        )
        .route(
            "/recommendations/{id}/movies/order",
            put(admin_recommendations::reorder_movies),
        )
        .route(
            "/recommendations/{id}/movies/{movie_id}",
            axum::routing::delete(admin_recommendations::remove_movie),
        )
        // News.
        .route(
            "/news",
            get(admin_news::list_news).post(admin_news::create_news),
        )
        .route(
            "/news/{id}",
            get(admin_news::get_news)
                .put(admin_news::update_news)
                .delete(admin_news::delete_news),
        )
        .route("/news/{id}/publish", post(admin_news::publish_news))
        .route("/news/{id}/unpublish", post(admin_news::unpublish_news))
        // Quizzes.
        .route(
            "/quizzes",
            get(admin_quizzes::list_quizzes).post(admin_quizzes::create_quiz),
        )
        .route(
            "/quizzes/{id}",
            get(admin_quizzes::get_quiz)
                .put(admin_quizzes::update_quiz)
                .delete(admin_quizzes::delete_quiz),
        )
}
