//! Configuration for the ranking pipeline.
//!
//! Values come from built-in defaults, an optional TOML file, and
//! `SMARTFIT_*` environment overrides, in that order.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smartfit_documents::PDF_MEDIA_TYPE;
use smartfit_embeddings::{
    DEFAULT_DIMENSION, EmbeddingProvider, GEMINI_API_KEY_ENV, GeminiProvider, HashingProvider,
    OpenAIProvider,
};
use tracing::{debug, warn};

use crate::error::{RankingError, Result};

/// Top-level configuration for the ranking pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Ranking thresholds and limits.
    pub ranking: RankingSettings,
}

impl RankingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load defaults, then the optional file, then `.env` and process
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", env_file.display());
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SMARTFIT_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("SMARTFIT_PROVIDER") {
            self.embedding.provider = provider.parse()?;
        }
        if let Some(model) = lookup("SMARTFIT_MODEL") {
            self.embedding.model = Some(model);
        }
        if let Some(value) = lookup("SMARTFIT_MIN_TEXT_LENGTH") {
            self.ranking.min_text_length = parse_override("SMARTFIT_MIN_TEXT_LENGTH", &value)?;
        }
        if let Some(value) = lookup("SMARTFIT_PREVIEW_LENGTH") {
            self.ranking.preview_length = parse_override("SMARTFIT_PREVIEW_LENGTH", &value)?;
        }
        if let Some(value) = lookup("SMARTFIT_MAX_CONCURRENCY") {
            self.ranking.max_concurrency = parse_override("SMARTFIT_MAX_CONCURRENCY", &value)?;
        }
        Ok(())
    }

    /// Reject settings the ranker cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.ranking.max_concurrency == 0 {
            return Err(RankingError::Config(
                "ranking.max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.ranking.preview_length == 0 {
            return Err(RankingError::Config(
                "ranking.preview_length must be at least 1".to_string(),
            ));
        }
        if self.embedding.timeout_secs == 0 {
            return Err(RankingError::Config(
                "embedding.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.ranking.accepted_media_types.is_empty() {
            return Err(RankingError::Config(
                "ranking.accepted_media_types must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RankingError::Config(format!("invalid value for {key}: {value:?}")))
}

/// Configuration for the embedding provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Which provider to use.
    pub provider: EmbeddingProviderType,

    /// Model to use for embeddings (provider default if unset).
    pub model: Option<String>,

    /// Override of the provider's API base URL.
    pub base_url: Option<String>,

    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,

    /// Vector size of the hashing provider.
    pub dimensions: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::Gemini,
            model: None,
            base_url: None,
            api_key_env: None,
            timeout_secs: 30,
            dimensions: None,
        }
    }
}

impl EmbeddingConfig {
    /// Environment variable the credential is read from.
    pub fn api_key_env(&self) -> &str {
        if let Some(name) = &self.api_key_env {
            return name;
        }
        match self.provider {
            EmbeddingProviderType::Gemini => GEMINI_API_KEY_ENV,
            EmbeddingProviderType::OpenAI => "OPENAI_API_KEY",
            EmbeddingProviderType::Hashing => "",
        }
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Construct the configured provider. A missing credential is logged
    /// here and reported by the provider on first use.
    pub fn build_provider(&self) -> Arc<dyn EmbeddingProvider> {
        let provider: Arc<dyn EmbeddingProvider> = match self.provider {
            EmbeddingProviderType::Gemini => {
                let mut provider =
                    GeminiProvider::from_key_env(self.api_key_env()).with_timeout(self.timeout());
                if let Some(model) = &self.model {
                    provider = provider.with_model(model);
                }
                if let Some(url) = &self.base_url {
                    provider = provider.with_base_url(url);
                }
                Arc::new(provider)
            }
            EmbeddingProviderType::OpenAI => {
                let mut provider =
                    OpenAIProvider::from_key_env(self.api_key_env()).with_timeout(self.timeout());
                if let Some(model) = &self.model {
                    provider = provider.with_model(model);
                }
                if let Some(url) = &self.base_url {
                    provider = provider.with_base_url(url);
                }
                Arc::new(provider)
            }
            EmbeddingProviderType::Hashing => Arc::new(HashingProvider::new(
                self.dimensions.unwrap_or(DEFAULT_DIMENSION),
            )),
        };

        if !provider.is_available() {
            warn!(
                "Embedding provider '{}' has no credential; set {}",
                provider.name(),
                self.api_key_env()
            );
        }
        provider
    }
}

/// Type of embedding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    /// Google Gemini embeddings API.
    Gemini,
    /// OpenAI embeddings API.
    #[serde(rename = "openai")]
    OpenAI,
    /// Offline feature hashing.
    Hashing,
}

impl FromStr for EmbeddingProviderType {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            "hashing" | "local" => Ok(Self::Hashing),
            other => Err(RankingError::Config(format!(
                "unknown embedding provider: {other}"
            ))),
        }
    }
}

/// Thresholds and limits applied while ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Candidates whose trimmed text has fewer characters are reported as
    /// empty and never embedded.
    pub min_text_length: usize,

    /// Number of characters kept in the preview.
    pub preview_length: usize,

    /// Candidates processed concurrently.
    pub max_concurrency: usize,

    /// Clamp successful scores into [0, 100] instead of keeping the sign.
    pub clamp_negative_scores: bool,

    /// Media types treated as documents; others are skipped.
    pub accepted_media_types: Vec<String>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            preview_length: 100,
            max_concurrency: 4,
            clamp_negative_scores: false,
            accepted_media_types: vec![PDF_MEDIA_TYPE.to_string()],
        }
    }
}
