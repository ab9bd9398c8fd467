//! Server configuration.
//!
//! The `[server]` table lives in the same TOML file as the ranking
//! configuration, so one file drives both the CLI and the service.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smartfit_ranking::RankingConfig;
use tracing::debug;

use crate::error::{ServerError, ServerResult};

/// Full service configuration: ranking sections plus `[server]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Embedding and ranking sections.
    #[serde(flatten)]
    pub ranking: RankingConfig,

    /// HTTP listener settings.
    pub server: ServerSettings,
}

/// Listener, limits and log output of the HTTP service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server bind address
    pub bind_addr: String,

    /// Server port
    pub port: u16,

    /// Maximum request body size in MB
    pub max_body_mb: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Log line format
    pub log_format: LogFormat,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            max_body_mb: 25,
            timeout_secs: 120,
            log_format: LogFormat::Text,
        }
    }
}

/// Format of log lines written by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ServerError::Config(format!("failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load defaults, the optional file, `.env`, then `SMARTFIT_*` overrides.
    pub fn load(path: Option<&Path>) -> ServerResult<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", env_file.display());
        }

        let mut config = match path {
            Some(path) => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply ranking overrides and `SMARTFIT_PORT`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ServerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.ranking
            .apply_env_overrides(&lookup)
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if let Some(port) = lookup("SMARTFIT_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("invalid value for SMARTFIT_PORT: {port:?}")))?;
        }
        Ok(())
    }

    fn validate(&self) -> ServerResult<()> {
        self.ranking
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        if self.server.max_body_mb == 0 {
            return Err(ServerError::Config(
                "server.max_body_mb must be at least 1".to_string(),
            ));
        }
        if self.server.timeout_secs == 0 {
            return Err(ServerError::Config(
                "server.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        Ok(format!("{}:{}", self.bind_addr, self.port).parse()?)
    }

    /// Request body limit in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb * 1024 * 1024
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
