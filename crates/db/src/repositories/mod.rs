//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod comment_repo;
pub mod credit_repo;
pub mod dashboard_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod news_repo;
pub mod person_repo;
pub mod quiz_repo;
pub mod rating_repo;
pub mod recommendation_repo;
pub mod session_repo;
pub mod user_list_repo;
pub mod user_repo;

pub use admin_repo::AdminRepo;
pub use comment_repo::{CommentRepo, ModerationFilter};
pub use credit_repo::CreditRepo;
pub use dashboard_repo::DashboardRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::{MovieFilter, MovieRepo};
pub use news_repo::NewsRepo;
pub use person_repo::PersonRepo;
pub use quiz_repo::QuizRepo;
pub use rating_repo::RatingRepo;
pub use recommendation_repo::RecommendationRepo;
pub use session_repo::SessionRepo;
pub use user_list_repo::UserListRepo;
pub use user_repo::UserRepo;
