//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blogpost_infra::{DatabaseConfig, JwtConfig};

/// Used when `DATABASE_URL` is not set.
const DEFAULT_DATABASE_URL: &str = "sqlite://blogpost.db?mode=rwc";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
    pub jwt: JwtConfig,
    pub posts_per_page: u64,
}

/// Read `key` and parse it, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let jwt_defaults = JwtConfig::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env_or("DB_MAX_CONNECTIONS", 10),
                min_connections: env_or("DB_MIN_CONNECTIONS", 1),
                sql_logging: env_flag("DB_SQL_LOGGING", false),
            },
            auto_migrate: env_flag("AUTO_MIGRATE", false),
            jwt: JwtConfig {
                secret: env::var("SECRET_KEY").unwrap_or(jwt_defaults.secret),
                expiration_hours: env_or("TOKEN_EXPIRATION_HOURS", jwt_defaults.expiration_hours),
                issuer: env::var("TOKEN_ISSUER").unwrap_or(jwt_defaults.issuer),
            },
            posts_per_page: env_or::<u64>("POSTS_PER_PAGE", 3).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        assert_eq!(env_or("BLOGPOST_TEST_SURELY_UNSET", 42u16), 42);
        assert!(!env_flag("BLOGPOST_TEST_SURELY_UNSET", false));
    }
}
