use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub token: TokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    /// Symmetric key for access token encryption. Its UTF-8 bytes must be
    /// exactly 32 bytes long; the token maker rejects anything else at startup.
    pub symmetric_key: String,
    pub access_token_minutes: i64,
}

impl TokenConfig {
    /// Configured access token lifetime as a duration.
    pub fn access_token_duration(&self) -> Duration {
        Duration::minutes(self.access_token_minutes)
    }
}

impl Config {
    /// Load configuration, later sources overriding earlier ones.
    ///
    /// Reads `config/default.toml`, then `config/{RUN_MODE}.toml`, then the
    /// process environment. `RUN_MODE` defaults to `development`.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Double underscore splits nesting: TOKEN__SYMMETRIC_KEY -> token.symmetric_key
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
