//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: any valid Bearer token.
//! - [`auth::MaybeUser`]: optional public-account token for personalized reads.
//! - [`rbac::RequireUser`]: a public account.
//! - [`rbac::RequireAdmin`] and friends: back-office accounts by capability.

pub mod auth;
pub mod rbac;
