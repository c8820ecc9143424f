//! # Auth Module
//!
//! This module plays both external roles of the original system:
//! - the identity provider: sign-up, sign-in, JWT issuance and refresh,
//!   attribute retrieval
//! - the edge authorizer: bearer-token validation and verified-claims
//!   injection in front of protected routes

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::{User, VerifiedClaims};
pub use routes::auth_routes;
