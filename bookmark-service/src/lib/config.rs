use std::env;
use std::ops::RangeInclusive;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token settings. The signing key itself is never read from here, only
/// from `BOOKMARKS_TOKEN_KEY` (see `auth::Secret::from_env`).
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub expiration_hours: i64,
}

/// Accepted token lifetimes, one hour up to thirty days.
pub const EXPIRATION_HOURS_RANGE: RangeInclusive<i64> = 1..=720;

impl JwtConfig {
    /// Token lifetime, rejecting values outside [`EXPIRATION_HOURS_RANGE`].
    pub fn ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if !EXPIRATION_HOURS_RANGE.contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between {} and {}, got {}",
                EXPIRATION_HOURS_RANGE.start(),
                EXPIRATION_HOURS_RANGE.end(),
                self.expiration_hours
            )));
        }
        Ok(chrono::Duration::hours(self.expiration_hours))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("jwt.issuer", auth::jwt::issuer::DEFAULT_ISSUER)?
            .set_default("jwt.expiration_hours", auth::jwt::issuer::DEFAULT_TTL_HOURS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.jwt.ttl()?;
        Ok(config)
    }
}
