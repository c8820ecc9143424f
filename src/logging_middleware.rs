// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode
//!
//! Credential-bearing fields (passwords, tokens) are redacted before the
//! body ever reaches a log line.

use axum::body::to_bytes;
use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Fields whose values must never appear in logs
const REDACTED_FIELDS: [&str; 3] = ["password", "token", "id_token"];

fn redact_sensitive_fields(value: &mut serde_json::Value) {
    if let Some(object) = value.as_object_mut() {
        for field in REDACTED_FIELDS {
            if object.contains_key(field) {
                object[field] = serde_json::Value::String("***".to_string());
            }
        }
    }
}

fn loggable_body(body_str: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body_str) {
        Ok(mut json) => {
            redact_sensitive_fields(&mut json);
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| body_str.to_string())
        }
        Err(_) => body_str.to_string(),
    }
}

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();

    // Read request body
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Log request body if not empty
    if !bytes.is_empty() {
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                request_body = %loggable_body(body_str),
                "📥 Request"
            );
        }
    }

    // Reconstruct request
    let request = Request::from_parts(parts, Body::from(bytes));

    // Call next middleware/handler
    let response = next.run(request).await;

    // Extract response parts
    let (parts, body) = response.into_parts();

    // Read response body
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Log response body if not empty
    if !bytes.is_empty() {
        if let Ok(body_str) = std::str::from_utf8(&bytes) {
            debug!(
                status = %parts.status,
                response_body = %loggable_body(body_str),
                "📤 Response"
            );
        }
    }

    // Reconstruct response
    let response = Response::from_parts(parts, Body::from(bytes));

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_and_token_fields_are_redacted() {
        let logged = loggable_body(r#"{"email":"x@y.com","password":"Abcdef12"}"#);
        assert!(!logged.contains("Abcdef12"));
        assert!(logged.contains("x@y.com"));

        let logged = loggable_body(r#"{"token":"eyJhbGciOi...","expires_at":1}"#);
        assert!(!logged.contains("eyJhbGciOi"));
    }

    #[test]
    fn test_non_json_body_passes_through() {
        assert_eq!(loggable_body("plain text"), "plain text");
    }
}
