//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Read-side projections (summaries, joined views) live next to the entity
//! they are built from.

pub mod admin;
pub mod comment;
pub mod credit;
pub mod dashboard;
pub mod genre;
pub mod movie;
pub mod news;
pub mod person;
pub mod quiz;
pub mod rating;
pub mod recommendation;
pub mod session;
pub mod user;
pub mod user_list;
