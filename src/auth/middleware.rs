//! Request authorizer middleware
//!
//! Plays the edge-gateway role in front of protected routes: validates the
//! bearer session token, then injects the verified identity claims into the
//! request extensions for downstream handlers. Requests without a valid token
//! are rejected with 401 and never reach the handler.

use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::extractors::bare_bearer_token;
use super::models::{Claims, VerifiedClaims};
use crate::common::{safe_email_log, ApiError, AppState};

pub async fn require_claims(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let app_state = state_lock.read().await.clone();

    // DEV MODE: inject the dev user's claims without a token
    if app_state.dev_mode.is_enabled() {
        let dev_user = app_state.dev_mode.create_dev_user();
        debug!(
            user_id = %dev_user.id,
            "DEV MODE: Authorizer bypassed"
        );
        request.extensions_mut().insert(VerifiedClaims {
            sub: Some(dev_user.id),
            email: Some(dev_user.email),
        });
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(bare_bearer_token);

    let token = match token {
        Some(t) => t,
        None => {
            warn!("Authorizer rejected request: missing Authorization header");
            return Err(ApiError::Unauthorized("missing auth".into()));
        }
    };

    let decoded = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(app_state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    ) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "Authorizer rejected request: invalid token");
            return Err(ApiError::Unauthorized("invalid token".into()));
        }
    };

    let claims = decoded.claims;
    debug!(
        sub = %claims.sub,
        email = %claims.email.as_deref().map(safe_email_log).unwrap_or_default(),
        "Authorizer verified session token"
    );

    request.extensions_mut().insert(VerifiedClaims {
        sub: Some(claims.sub),
        email: claims.email,
    });

    Ok(next.run(request).await)
}
