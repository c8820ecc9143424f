//! Greeting handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::HelloResponse;
use crate::auth::models::VerifiedClaims;
use crate::common::{safe_email_log, ApiError, AppState};

/// Ordered display-identity fallback over the optional claims:
/// email first, then subject, then the literal "anonymous".
///
/// Absent claims are a degraded-but-valid case. Authentication enforcement
/// belongs to the authorizer in front of this handler, never here.
pub fn display_identity(claims: Option<&VerifiedClaims>) -> &str {
    let Some(claims) = claims else {
        return "anonymous";
    };
    if let Some(email) = claims.email.as_deref() {
        return email;
    }
    if let Some(sub) = claims.sub.as_deref() {
        return sub;
    }
    "anonymous"
}

/// GET /hello
/// Greets the authenticated caller
///
/// # Response
/// ```json
/// {
///   "message": "Hello x@y.com from TravelM8!"
/// }
/// ```
pub async fn hello_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    claims: Option<Extension<VerifiedClaims>>,
) -> Result<Json<HelloResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let claims = claims.map(|Extension(c)| c);
    let display = display_identity(claims.as_ref());

    let message = format!("Hello {} from {}!", display, state.service_name);

    info!(
        sub = %claims.as_ref().and_then(|c| c.sub.as_deref()).unwrap_or("-"),
        email = %claims
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .map(safe_email_log)
            .unwrap_or_default(),
        "Responding with greeting"
    );

    Ok(Json(HelloResponse { message }))
}
