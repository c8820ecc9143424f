//! # Hello Module
//!
//! The greeting function: one stateless handler that reads the verified
//! identity claims injected by the authorizer and answers with a greeting.

pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use models::HelloResponse;
pub use routes::hello_routes;
