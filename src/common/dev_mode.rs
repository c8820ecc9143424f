// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing authentication for testing purposes

use chrono::Utc;
use std::env;

use crate::auth::models::User;

/// Fixed id for the dev user so it stays stable across requests
const DEV_USER_ID: &str = "U_DEV000";

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub user_email: String,
    pub user_given_name: String,
    pub user_family_name: String,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let user_email = env::var("DEV_USER_EMAIL").unwrap_or_else(|_| "dev@test.com".to_string());

        let user_given_name =
            env::var("DEV_USER_GIVEN_NAME").unwrap_or_else(|_| "Dev".to_string());

        let user_family_name =
            env::var("DEV_USER_FAMILY_NAME").unwrap_or_else(|_| "User".to_string());

        Self {
            enabled,
            user_email,
            user_given_name,
            user_family_name,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create a dev user for testing
    pub fn create_dev_user(&self) -> User {
        User {
            id: DEV_USER_ID.to_string(),
            email: self.user_email.clone(),
            given_name: self.user_given_name.clone(),
            family_name: self.user_family_name.clone(),
            email_verified: true,
            password_hash: String::new(),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }
}

/// Print dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        println!("⚠️  🔓 DEV MODE ENABLED 🔓 ⚠️");
        println!("   Authentication bypassed for testing");
        println!(
            "   Dev User: {} {} ({})",
            config.user_given_name, config.user_family_name, config.user_email
        );
        println!("   ⚠️  DO NOT USE IN PRODUCTION ⚠️");
        println!();
    } else {
        println!("🔒 Production mode - Authentication required");
    }
}

/// CLI argument parsing for dev mode
pub fn parse_dev_mode_args() -> Option<bool> {
    let args: Vec<String> = env::args().collect();

    for arg in &args {
        match arg.as_str() {
            "--dev" | "--dev-mode" => return Some(true),
            "--no-dev" | "--prod" | "--production" => return Some(false),
            _ => {}
        }
    }

    None
}

/// Apply a CLI override on top of the environment configuration
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(enabled) = parse_dev_mode_args() {
        config.enabled = enabled;
    }
    config
}
