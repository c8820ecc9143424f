//! Greeting routes

use axum::{middleware, routing::get, Router};

use super::handlers;
use crate::auth;

/// Creates and returns the greeting router
///
/// # Routes
/// - `GET /hello` - Authenticated greeting
///
/// The authorizer is attached to this route specifically, mirroring a
/// gateway that validates the bearer token before forwarding. The handler
/// itself stays tolerant of absent claims.
pub fn hello_routes() -> Router {
    Router::new()
        .route("/hello", get(handlers::hello_handler))
        .route_layer(middleware::from_fn(auth::middleware::require_claims))
}
