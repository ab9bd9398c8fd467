//! Embedding providers.
//!
//! Every provider maps one text to one vector through
//! [`EmbeddingProvider::embed`]. Implementations are stateless apart from
//! their HTTP client, so a single instance is shared across requests.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Default per-call timeout for remote providers.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One text to embed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Text to embed.
    pub text: String,

    /// Model override; the provider's default when unset.
    pub model: Option<String>,

    /// Requested vector size, for providers that can truncate.
    pub dimensions: Option<usize>,
}

impl EmbeddingRequest {
    /// Request for `text` with the provider's defaults.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            dimensions: None,
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Request a specific vector size.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

/// A vector produced by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The vector.
    pub embedding: Embedding,

    /// Model that produced the vector.
    pub model: String,

    /// Number of entries in `embedding`.
    pub dimension: usize,

    /// Tokens billed, when the provider reports them.
    pub tokens_used: Option<u64>,
}

impl EmbeddingResponse {
    /// Build a response from a raw vector, rejecting empty vectors.
    pub fn from_vector(embedding: Embedding, model: impl Into<String>) -> Result<Self> {
        if embedding.is_empty() {
            return Err(EmbeddingError::InvalidResponse(
                "provider returned an empty vector".to_string(),
            ));
        }
        Ok(Self {
            dimension: embedding.len(),
            embedding,
            model: model.into(),
            tokens_used: None,
        })
    }
}

/// Maps text to a dense vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short provider name used in logs and `/health`.
    fn name(&self) -> &str;

    /// Model used when a request does not name one.
    fn default_model(&self) -> &str;

    /// Vector size of the default model.
    fn default_dimension(&self) -> usize;

    /// Embed one text. Blank input fails with
    /// [`EmbeddingError::EmptyInput`] before any remote call.
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Whether a credential is present.
    fn is_available(&self) -> bool;
}

/// Reject input that no provider should be asked to embed.
pub fn validate_input(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(EmbeddingError::EmptyInput);
    }
    Ok(())
}

/// Turn a non-success provider response into the matching error.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        return Err(EmbeddingError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    let message = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(EmbeddingError::Unauthorized(message));
    }

    Err(EmbeddingError::ApiRequest {
        status: status.as_u16(),
        message,
    })
}

/// OpenAI-compatible `/embeddings` provider.
pub struct OpenAIProvider {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Default model.
    default_model: String,

    /// Per-call timeout.
    timeout: Duration,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider reading `OPENAI_API_KEY`.
    pub fn new() -> Self {
        Self::from_key_env("OPENAI_API_KEY")
    }

    /// Create a provider whose API key is read from `var`.
    pub fn from_key_env(var: &str) -> Self {
        Self {
            api_key: std::env::var(var).ok(),
            base_url: "https://api.openai.com/v1".to_string(),
            client: reqwest::Client::new(),
            default_model: "text-embedding-3-small".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OpenAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn default_dimension(&self) -> usize {
        match self.default_model.as_str() {
            "text-embedding-3-large" => 3072,
            _ => 1536,
        }
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        validate_input(&request.text)?;

        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| EmbeddingError::ProviderNotConfigured {
                provider: self.name().to_string(),
            })?;

        let model = request.model.unwrap_or_else(|| self.default_model.clone());

        debug!("Generating embedding with model: {model}");

        let mut body = serde_json::json!({
            "input": request.text,
            "model": model
        });

        if let Some(dims) = request.dimensions {
            body["dimensions"] = serde_json::json!(dims);
        }

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(EmbeddingError::from_transport)?;

        let result: OpenAIEmbeddingResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let embedding = result
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("No embedding in response".to_string()))?
            .embedding;

        let mut response = EmbeddingResponse::from_vector(embedding, result.model)?;
        response.tokens_used = result.usage.map(|u| u.total_tokens);

        info!("Generated embedding with {} dimensions", response.dimension);

        Ok(response)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
    model: String,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    total_tokens: u64,
}
