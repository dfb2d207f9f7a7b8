//! Application configuration loaded from environment variables.

use std::env;

use vellum_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub content: ContentConfig,
}

/// Content store configuration. The directory is explicit here rather
/// than an ambient process-wide path.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub dir: String,
    pub default_author: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            content: ContentConfig {
                dir: env::var("CONTENT_DIR").unwrap_or_else(|_| "content/blog".to_string()),
                default_author: env::var("CONTENT_DEFAULT_AUTHOR")
                    .unwrap_or_else(|_| "Site Owner".to_string()),
            },
        }
    }
}
