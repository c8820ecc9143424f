//! Authentication handlers

use axum::extract::{Extension, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::extractors::AuthedUser;
use super::models::{Claims, LoginRequest, SignupRequest, User};
use super::password::{hash_password, verify_password};
use super::validators::{LoginValidator, SignupValidator};
use crate::common::{
    generate_token_id, generate_user_id, safe_email_log, safe_token_log, ApiError, AppState,
    Validator,
};

/// POST /api/auth/signup
/// Registers a new account and signs it in
///
/// # Request Body
/// ```json
/// {
///   "email": "x@y.com",
///   "given_name": "A",
///   "family_name": "B",
///   "password": "Abcdef12"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "token": "<jwt token>",
///   "expires_at": 1700000000,
///   "user": { ... }
/// }
/// ```
pub async fn signup_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Received sign-up request");
    let state = state_lock.read().await.clone();

    let validation = SignupValidator.validate(&payload);
    if !validation.is_valid() {
        warn!(
            error_count = validation.errors.len(),
            "Sign-up request failed validation"
        );
        return Err(validation.into());
    }

    let email = payload.email.trim().to_lowercase();

    // Email is the sign-in alias, so it must be unique
    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                email = %safe_email_log(&email),
                "Database error checking existing user during sign-up"
            );
            ApiError::DatabaseError(e)
        })?;

    if existing.is_some() {
        warn!(
            email = %safe_email_log(&email),
            "Sign-up rejected: email already registered"
        );
        return Err(ApiError::Conflict("email already registered".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let id = generate_user_id();

    info!(
        user_id = %id,
        email = %safe_email_log(&email),
        "Creating new user account"
    );

    // The pool auto-verifies email at sign-up; the verification-code email
    // channel belongs to a managed provider and has no self-hosted analogue.
    if let Err(e) = sqlx::query(
        "INSERT INTO users (id, email, given_name, family_name, email_verified, password_hash) VALUES (?, ?, ?, ?, 1, ?)",
    )
    .bind(&id)
    .bind(&email)
    .bind(payload.given_name.trim())
    .bind(payload.family_name.trim())
    .bind(&password_hash)
    .execute(&state.db)
    .await
    {
        error!(
            error = %e,
            user_id = %id,
            email = %safe_email_log(&email),
            "Database error inserting new user during sign-up"
        );
        return Err(ApiError::DatabaseError(e));
    }

    // fetch back
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %id,
                "Database error fetching newly created user during sign-up"
            );
            ApiError::DatabaseError(e)
        })?;

    let (token, expires_at) = issue_token(&user, &state)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "New user account created and signed in"
    );

    let resp = serde_json::json!({
        "token": token,
        "expires_at": expires_at,
        "user": user.attributes(),
    });

    Ok(Json(resp))
}

/// POST /api/auth/login
/// Authenticates a user by email and password
///
/// # Response
/// ```json
/// {
///   "token": "<jwt token>",
///   "expires_at": 1700000000,
///   "user": { ... }
/// }
/// ```
pub async fn login_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Received sign-in request");
    let state = state_lock.read().await.clone();

    let validation = LoginValidator.validate(&payload);
    if !validation.is_valid() {
        return Err(validation.into());
    }

    let email = payload.email.trim().to_lowercase();

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                email = %safe_email_log(&email),
                "Database error during user lookup in sign-in"
            );
            ApiError::DatabaseError(e)
        })?;

    // Unknown email and wrong password are indistinguishable to the caller
    let user = match user {
        Some(u) if verify_password(&payload.password, &u.password_hash) => u,
        Some(u) => {
            warn!(
                user_id = %u.id,
                email = %safe_email_log(&email),
                "Sign-in rejected: wrong password"
            );
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
        None => {
            warn!(
                email = %safe_email_log(&email),
                "Sign-in rejected: unknown email"
            );
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
    };

    let (token, expires_at) = issue_token(&user, &state)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User sign-in successful"
    );

    let resp = serde_json::json!({
        "token": token,
        "expires_at": expires_at,
        "user": user.attributes(),
    });

    Ok(Json(resp))
}

/// POST /api/auth/refresh
/// Reissues a session token with a full lifetime
///
/// Requires a currently-valid bearer token; there is no server-side session
/// to consult, so an expired token cannot be refreshed, only re-earned by
/// signing in again.
pub async fn refresh_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    // In dev mode the dev user has no database row to refresh from
    let user = if state.dev_mode.is_enabled() {
        state.dev_mode.create_dev_user()
    } else {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&authed.id)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?
    };

    let (token, expires_at) = issue_token(&user, &state)?;

    debug!(
        user_id = %user.id,
        token = %safe_token_log(&token),
        expires_at = expires_at,
        "Session token refreshed"
    );

    let resp = serde_json::json!({
        "token": token,
        "expires_at": expires_at,
    });

    Ok(Json(resp))
}

/// GET /api/me
/// Returns the current authenticated user's attributes
///
/// # Response
/// ```json
/// {
///   "user": {
///     "sub": "U_K7NP3X",
///     "email": "x@y.com",
///     "email_verified": "true",
///     "given_name": "A",
///     "family_name": "B"
///   }
/// }
/// ```
#[axum::debug_handler]
pub async fn me_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    // In dev mode, return the dev user directly without database lookup
    if state.dev_mode.is_enabled() {
        let dev_user = state.dev_mode.create_dev_user();
        let resp = serde_json::json!({
            "user": dev_user.attributes(),
        });
        return Ok(Json(resp));
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let resp = serde_json::json!({
        "user": user.attributes(),
    });
    Ok(Json(resp))
}

/// POST /api/auth/logout
/// Logout endpoint - since we're using JWT tokens, logout is handled client-side
/// This endpoint just returns success to confirm the logout request
pub async fn logout_handler(_authed: AuthedUser) -> Result<Json<serde_json::Value>, ApiError> {
    info!("User logout successful");
    let resp = serde_json::json!({
        "message": "Logout successful"
    });
    Ok(Json(resp))
}

// ---- Helper Functions ----

/// Create a signed session token for a user, returning it with its expiry
fn issue_token(user: &User, state: &AppState) -> Result<(String, i64), ApiError> {
    let expires_at = (Utc::now() + Duration::hours(state.token_ttl_hours)).timestamp();
    let jti = generate_token_id();
    let claims = Claims {
        sub: user.id.clone(),
        email: Some(user.email.clone()),
        jti: jti.clone(),
        exp: expires_at as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        error!(
            error = %e,
            user_id = %user.id,
            "JWT encoding error during token issuance"
        );
        ApiError::InternalServer("jwt error".to_string())
    })?;

    debug!(
        user_id = %user.id,
        token_id = %jti,
        expires_at = expires_at,
        "Issued session token"
    );

    Ok((token, expires_at))
}
