//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
///
/// `email` rides along with the subject so the greeting endpoint can address
/// the caller without a database round trip, mirroring what an identity
/// provider puts in an ID token.
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    pub jti: String,
    pub exp: usize,
}

/// Verified identity claims injected into the request context by the
/// authorizer middleware. Consumers must treat both fields as optional:
/// a missing claim is a degraded-but-valid case, never an error.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    pub sub: Option<String>,
    pub email: Option<String>,
}

/// User database model
#[derive(FromRow, Serialize, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Option<String>,
}

impl User {
    /// Cognito-style attribute map. `email_verified` is reported as a
    /// boolean-as-string ("true"/"false"), matching the provider contract
    /// the client was written against.
    pub fn attributes(&self) -> serde_json::Value {
        serde_json::json!({
            "sub": self.id,
            "email": self.email,
            "email_verified": if self.email_verified { "true" } else { "false" },
            "given_name": self.given_name,
            "family_name": self.family_name,
        })
    }
}

/// Sign-up request payload
#[derive(Deserialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub password: String,
}

/// Sign-in request payload
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
