//! Google Gemini embedding provider (`models/{model}:embedContent`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{EmbeddingError, Result};
use crate::provider::{
    DEFAULT_TIMEOUT, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, check_status,
    validate_input,
};

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GOOGLE_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "text-embedding-004";

/// How the embedded text will be used. Gemini tunes vectors per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskType {
    #[default]
    RetrievalDocument,
    RetrievalQuery,
    SemanticSimilarity,
}

impl TaskType {
    fn as_api_str(self) -> &'static str {
        match self {
            TaskType::RetrievalDocument => "RETRIEVAL_DOCUMENT",
            TaskType::RetrievalQuery => "RETRIEVAL_QUERY",
            TaskType::SemanticSimilarity => "SEMANTIC_SIMILARITY",
        }
    }
}

/// Gemini embedding provider.
pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
    default_model: String,
    task_type: TaskType,
    timeout: Duration,
}

impl GeminiProvider {
    /// Create a new Gemini provider reading `GOOGLE_API_KEY`.
    pub fn new() -> Self {
        Self::from_key_env(GEMINI_API_KEY_ENV)
    }

    /// Create a provider whose API key is read from `var`.
    pub fn from_key_env(var: &str) -> Self {
        Self {
            api_key: std::env::var(var).ok(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
            default_model: DEFAULT_MODEL.to_string(),
            task_type: TaskType::default(),
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

    /// Set the default model. A leading `models/` is accepted and stripped.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = bare_model_name(&model.into()).to_string();
        self
    }

    /// Set the task type sent with every request.
    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn bare_model_name(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}

#[async_trait]
impl EmbeddingProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn default_dimension(&self) -> usize {
        match self.default_model.as_str() {
            "gemini-embedding-001" => 3072,
            _ => 768,
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

        let model = request
            .model
            .as_deref()
            .map_or(self.default_model.as_str(), bare_model_name)
            .to_string();

        debug!("Generating embedding with model: {model}");

        let mut body = serde_json::json!({
            "model": format!("models/{model}"),
            "content": { "parts": [{ "text": request.text }] },
            "taskType": self.task_type.as_api_str(),
        });

        if let Some(dims) = request.dimensions {
            body["outputDimensionality"] = serde_json::json!(dims);
        }

        let response = self
            .client
            .post(format!("{}/models/{model}:embedContent", self.base_url))
            .header("x-goog-api-key", api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(EmbeddingError::from_transport)?;

        let result: GeminiEmbedResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let response = EmbeddingResponse::from_vector(result.embedding.values, model)?;

        info!("Generated embedding with {} dimensions", response.dimension);

        Ok(response)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiEmbedResponse {
    embedding: GeminiContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct GeminiContentEmbedding {
    values: Vec<f32>,
}
