use std::time::Duration;

use anyhow::{Context, Result};
use storage::PoolSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiration_hours: i64,
    pub pool: PoolSettings,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = PoolSettings::default();

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_or("PORT", 8080).context("PORT must be a number")?,
            mongodb_uri: std::env::var("MONGODB_URI")
                .context("Cannot load MONGODB_URI env variable")?,
            database_name: env_or("DATABASE_NAME", "lucha_canaria"),
            jwt_secret: std::env::var("JWT_SECRET")
                .context("Cannot load JWT_SECRET env variable")?,
            jwt_issuer: env_or("JWT_ISSUER", "lucha-canaria-api"),
            jwt_audience: env_or("JWT_AUDIENCE", "lucha-canaria-clients"),
            jwt_expiration_hours: parse_or("JWT_EXPIRATION_HOURS", 24)
                .context("JWT_EXPIRATION_HOURS must be a number")?,
            pool: PoolSettings {
                min_pool_size: parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)
                    .context("MONGODB_MIN_POOL_SIZE must be a number")?,
                max_pool_size: parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)
                    .context("MONGODB_MAX_POOL_SIZE must be a number")?,
                connect_timeout: Duration::from_secs(
                    parse_or(
                        "MONGODB_CONNECT_TIMEOUT_SECS",
                        defaults.connect_timeout.as_secs(),
                    )
                    .context("MONGODB_CONNECT_TIMEOUT_SECS must be a number")?,
                ),
            },
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)
                .context("BCRYPT_COST must be a number")?,
        })
    }

    /// The MongoDB URI without credentials, fit for logs
    pub fn redacted_mongodb_uri(&self) -> &str {
        self.mongodb_uri
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => Ok(value.trim().parse()?),
        Err(_) => Ok(default),
    }
}
