//! Tests for hello module
//!
//! These tests pin the greeting contract: the display-identity fallback
//! ordering and the message produced by the handler.

#[cfg(test)]
mod tests {
    use super::super::handlers::{display_identity, hello_handler};
    use super::super::routes::hello_routes;
    use crate::auth::models::{Claims, VerifiedClaims};
    use crate::common::dev_mode::DevModeConfig;
    use crate::common::AppState;
    use axum::body::{to_bytes, Body};
    use axum::extract::Extension;
    use axum::http::{Request, StatusCode};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    fn claims(sub: Option<&str>, email: Option<&str>) -> VerifiedClaims {
        VerifiedClaims {
            sub: sub.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    async fn test_state() -> Arc<RwLock<AppState>> {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        Arc::new(RwLock::new(AppState {
            db: pool,
            jwt_secret: "test_secret_key".to_string(),
            token_ttl_hours: 24,
            service_name: "TravelM8".to_string(),
            dev_mode: DevModeConfig {
                enabled: false,
                user_email: "dev@test.com".to_string(),
                user_given_name: "Dev".to_string(),
                user_family_name: "User".to_string(),
            },
        }))
    }

    #[test]
    fn test_display_prefers_email() {
        let c = claims(Some("u123"), Some("a@b.com"));
        assert_eq!(display_identity(Some(&c)), "a@b.com");
    }

    #[test]
    fn test_display_falls_back_to_subject() {
        let c = claims(Some("u123"), None);
        assert_eq!(display_identity(Some(&c)), "u123");
    }

    #[test]
    fn test_display_falls_back_to_anonymous() {
        let c = claims(None, None);
        assert_eq!(display_identity(Some(&c)), "anonymous");
        assert_eq!(display_identity(None), "anonymous");
    }

    #[tokio::test]
    async fn test_hello_message_contains_email() {
        let state = test_state().await;
        let c = claims(Some("u123"), Some("a@b.com"));

        let response = hello_handler(Extension(state), Some(Extension(c)))
            .await
            .expect("Handler should succeed");

        assert_eq!(response.0.message, "Hello a@b.com from TravelM8!");
    }

    #[tokio::test]
    async fn test_hello_message_contains_subject_without_email() {
        let state = test_state().await;
        let c = claims(Some("u123"), None);

        let response = hello_handler(Extension(state), Some(Extension(c)))
            .await
            .expect("Handler should succeed");

        assert!(response.0.message.contains("u123"));
    }

    #[tokio::test]
    async fn test_hello_message_anonymous_without_claims() {
        let state = test_state().await;

        let response = hello_handler(Extension(state), None)
            .await
            .expect("Handler should succeed");

        assert_eq!(response.0.message, "Hello anonymous from TravelM8!");
    }

    fn signed_token(secret: &str, sub: &str, email: Option<&str>) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            jti: "K_TEST01".to_string(),
            exp: 9999999999,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    #[tokio::test]
    async fn test_gateway_rejects_request_without_token() {
        let state = test_state().await;
        let app = axum::Router::new()
            .merge(hello_routes())
            .layer(Extension(state));

        let request = Request::builder()
            .method("GET")
            .uri("/hello")
            .body(Body::empty())
            .expect("Failed to build request");

        let response = app.oneshot(request).await.expect("Request should complete");

        // Rejected at the authorizer, before the greeting handler
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gateway_rejects_request_with_invalid_token() {
        let state = test_state().await;
        let app = axum::Router::new()
            .merge(hello_routes())
            .layer(Extension(state));

        let forged = signed_token("some_other_secret", "U_TEST01", Some("a@b.com"));
        let request = Request::builder()
            .method("GET")
            .uri("/hello")
            .header("authorization", format!("Bearer {}", forged))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = app.oneshot(request).await.expect("Request should complete");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gateway_forwards_verified_claims_to_handler() {
        let state = test_state().await;
        let app = axum::Router::new()
            .merge(hello_routes())
            .layer(Extension(state));

        let token = signed_token("test_secret_key", "U_TEST01", Some("a@b.com"));
        let request = Request::builder()
            .method("GET")
            .uri("/hello")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = app.oneshot(request).await.expect("Request should complete");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).expect("Body should be JSON");

        assert_eq!(body["message"], "Hello a@b.com from TravelM8!");
    }

    #[tokio::test]
    async fn test_hello_message_uses_configured_service_name() {
        let state = test_state().await;
        state.write().await.service_name = "OtherService".to_string();

        let response = hello_handler(Extension(state), None)
            .await
            .expect("Handler should succeed");

        assert_eq!(response.0.message, "Hello anonymous from OtherService!");
    }
}
