//! Thin reqwest client for the TravelM8 API

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// User attributes as reported by the identity provider.
///
/// Every field is optional: the client never assumes the provider returned
/// a complete attribute set.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAttributes {
    pub sub: Option<String>,
    pub email: Option<String>,
    /// Boolean-as-string, "true"/"false"
    pub email_verified: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

impl UserAttributes {
    /// Welcome-line display preference: given name, else email, else "User"
    pub fn display_name(&self) -> &str {
        self.given_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub given_name: &'a str,
    pub family_name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Sign-up / sign-in response: the session token plus the user's attributes
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserAttributes,
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
    pub expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: UserAttributes,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub enum ClientError {
    /// Token missing/invalid/expired - surfaced by the gateway before the
    /// greeting function is ever reached
    Unauthorized(String),
    /// Any other API-level failure, with the server's error message
    Api(String),
    /// Transport-level failure
    Network(String),
    /// Response body did not match the expected shape
    UnexpectedBody(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Unauthorized(msg) => write!(f, "not authorized: {}", msg),
            ClientError::Api(msg) => write!(f, "API error: {}", msg),
            ClientError::Network(msg) => write!(f, "network error: {}", msg),
            ClientError::UnexpectedBody(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

/// Render the greeting response body defensively: trust `message` only when
/// it is present and a string, otherwise fall back to the raw payload.
pub fn render_message(payload: &serde_json::Value) -> String {
    match payload.get("message").and_then(serde_json::Value::as_str) {
        Some(message) => message.to_string(),
        None => match payload.as_str() {
            Some(raw) => raw.to_string(),
            None => payload.to_string(),
        },
    }
}

/// Thin HTTP client for the identity provider and greeting endpoints
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn signup(&self, request: &SignupRequest<'_>) -> Result<AuthResponse, ClientError> {
        let url = format!("{}/api/auth/signup", self.base_url);
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::parse_json(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::parse_json(response).await
    }

    pub async fn refresh(&self, token: &str) -> Result<RefreshResponse, ClientError> {
        let url = format!("{}/api/auth/refresh", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::parse_json(response).await
    }

    pub async fn fetch_attributes(&self, token: &str) -> Result<UserAttributes, ClientError> {
        let url = format!("{}/api/me", self.base_url);
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::parse_json::<MeResponse>(response)
            .await
            .map(|body| body.user)
    }

    /// Call the greeting endpoint and render its body defensively
    pub async fn call_hello(&self, token: &str) -> Result<String, ClientError> {
        let url = format!("{}/hello", self.base_url);
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let payload = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ClientError::UnexpectedBody(e.to_string()))?;

        Ok(render_message(&payload))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::UnexpectedBody(e.to_string()))
    }

    /// Map a non-success response onto a client error, preferring the
    /// server's own error message when the body carries one
    async fn api_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("request failed with status {}", status),
        };

        if status == StatusCode::UNAUTHORIZED {
            ClientError::Unauthorized(message)
        } else {
            ClientError::Api(message)
        }
    }
}
