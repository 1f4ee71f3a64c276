//! Domain vocabulary for the Marquee movie catalog.
//!
//! This crate performs no I/O. It holds the id/timestamp aliases, the
//! domain error type, role and capability rules, and the validation
//! functions shared by the repository and HTTP layers.

pub mod catalog;
pub mod comments;
pub mod error;
pub mod moderation;
pub mod quiz;
pub mod ratings;
pub mod recommendation;
pub mod roles;
pub mod search;
pub mod slug;
pub mod types;
pub mod user_list;
