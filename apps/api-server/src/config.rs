//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL").map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = lookup("DB_MAX_CONNECTIONS").and_then(|s| s.parse().ok()) {
                config.max_connections = max;
            }
            if let Some(min) = lookup("DB_MIN_CONNECTIONS").and_then(|s| s.parse().ok()) {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            database,
        }
    }
}
