//! API key configuration, following the same `FromEnv` pattern as
//! `ServerConfig` and `MongoConfig`.

use core_config::{ConfigError, Environment, FromEnv, env_required};

/// Key accepted when `API_KEY` is unset outside production.
pub const DEVELOPMENT_API_KEY: &str = "12345-KLMNO-67890-PQRST";

/// Loaded from environment variables:
/// - `API_KEY`: required when `APP_ENV=production`, defaults to
///   [`DEVELOPMENT_API_KEY`] otherwise
#[derive(Clone)]
pub struct ApiKeyConfig {
    pub key: String,
}

impl ApiKeyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig").field("key", &"<redacted>").finish()
    }
}

impl FromEnv for ApiKeyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let key = if Environment::from_env().is_production() {
            env_required("API_KEY")?
        } else {
            std::env::var("API_KEY").unwrap_or_else(|_| DEVELOPMENT_API_KEY.to_string())
        };

        if key.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "API_KEY".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self { key })
    }
}
