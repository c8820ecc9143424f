//! In-memory session token handling
//!
//! The token lives only for the process lifetime - nothing is ever written
//! to disk.

use chrono::Utc;

use crate::client::{ApiClient, ClientError};

/// Refresh when this close to expiry, so a token is never presented right as
/// it lapses
const REFRESH_LEEWAY_SECS: i64 = 60;

#[derive(Debug)]
pub struct Session {
    token: String,
    expires_at: i64,
}

impl Session {
    pub fn new(token: String, expires_at: i64) -> Self {
        Self { token, expires_at }
    }

    pub fn is_stale(&self, now: i64) -> bool {
        self.expires_at - now <= REFRESH_LEEWAY_SECS
    }

    /// Current session token, refreshed first if it is about to expire
    pub async fn current_token(&mut self, client: &ApiClient) -> Result<&str, ClientError> {
        if self.is_stale(Utc::now().timestamp()) {
            let refreshed = client.refresh(&self.token).await?;
            self.token = refreshed.token;
            self.expires_at = refreshed.expires_at;
        }
        Ok(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_not_stale() {
        let session = Session::new("token".to_string(), 10_000);
        assert!(!session.is_stale(1_000));
    }

    #[test]
    fn test_token_near_expiry_is_stale() {
        let session = Session::new("token".to_string(), 10_000);
        assert!(session.is_stale(10_000 - REFRESH_LEEWAY_SECS));
        assert!(session.is_stale(10_000));
        assert!(session.is_stale(20_000));
    }
}
