//! Application configuration loaded from TOML, with environment overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use tickmarket_core::{EngineSettings, MarketPaths};

pub const ENV_HOST: &str = "TICKMARKET_HOST";
pub const ENV_PORT: &str = "TICKMARKET_PORT";
pub const ENV_SECRET: &str = "TICKMARKET_SECRET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    #[error("jwt auth needs a secret: set [auth].secret or TICKMARKET_SECRET")]
    MissingSecret,
}

/// Top-level config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Default tracing filter; `RUST_LOG` wins when set.
    pub log_level: String,
    pub server: ServerConfig,
    pub engine: EngineSettings,
    pub markets: MarketPaths,
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            server: ServerConfig::default(),
            engine: EngineSettings::default(),
            markets: MarketPaths::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `TICKMARKET_*` environment variables on top of the file values.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            std::env::var(ENV_HOST).ok(),
            std::env::var(ENV_PORT).ok(),
            std::env::var(ENV_SECRET).ok(),
        )
    }

    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<String>,
        secret: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: ENV_PORT, value: port })?;
        }
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.auth.secret = Some(secret);
        }
        Ok(())
    }
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8484,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How session tokens are minted and checked.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// HS256-signed JWTs.
    #[default]
    Jwt,
    /// Random opaque tokens; the session directory is the only check.
    Opaque,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub scheme: AuthScheme,
    pub secret: Option<String>,
}
