//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blogpost_infra::database::DatabaseConfig;

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
    ///
    /// With `APP_ENV=test` the database target is `TEST_DATABASE_URL`
    /// rather than `DATABASE_URL`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let url_key = match get("APP_ENV").as_deref() {
            Some("test") => "TEST_DATABASE_URL",
            _ => "DATABASE_URL",
        };

        let database = get(url_key).map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: parse_or(&get, "DB_MIN_CONNECTIONS", defaults.min_connections),
                connect_timeout: get("DB_CONNECT_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.connect_timeout),
                ..defaults
            }
        });

        Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&get, "PORT", 8080),
            database,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    get(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}
