// Application state shared across all modules

use sqlx::SqlitePool;

use crate::common::dev_mode::DevModeConfig;

/// Application state containing the database pool and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_ttl_hours: i64,
    /// Display name used in the greeting message suffix
    pub service_name: String,
    pub dev_mode: DevModeConfig,
}
