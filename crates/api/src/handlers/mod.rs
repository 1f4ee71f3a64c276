//! Request handlers, one module per resource.
//!
//! Public handlers come first; `admin_*` modules back the `/admin` dashboard.

pub mod auth;
pub mod catalog;
pub mod comments;
pub mod me;
pub mod movies;
pub mod news;
pub mod quizzes;
pub mod recommendations;

pub mod admin_accounts;
pub mod admin_auth;
pub mod admin_catalog;
pub mod admin_comments;
pub mod admin_news;
pub mod admin_quizzes;
pub mod admin_recommendations;
pub mod admin_users;
pub mod dashboard;
