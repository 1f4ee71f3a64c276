//! Authentication primitives shared by the public and admin login flows.
//!
//! - [`password`]: Argon2id hashing and strength checks.
//! - [`jwt`]: access tokens and opaque refresh tokens.
//! - [`session`]: lockout policy and token-pair issuance.

pub mod jwt;
pub mod password;
pub mod session;
