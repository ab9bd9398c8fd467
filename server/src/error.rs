use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use smartfit_ranking::{EmbeddingError, RankingError};
use tracing::error;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// The job description could not be embedded.
    #[error("AI API error: {0}")]
    Embedding(#[source] EmbeddingError),

    #[error("Ranking failed: {0}")]
    Ranking(#[source] RankingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Multipart(err) => err.status(),
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Embedding(_)
            | ServerError::Ranking(_)
            | ServerError::Config(_)
            | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Multipart(_) => "INVALID_MULTIPART",
            ServerError::Embedding(_) => "EMBEDDING_ERROR",
            ServerError::Ranking(_) => "RANKING_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::Io(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl From<RankingError> for ServerError {
    fn from(err: RankingError) -> Self {
        match err {
            RankingError::ReferenceEmbedding(source) => ServerError::Embedding(source),
            other => ServerError::Ranking(other),
        }
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_failure_maps_to_embedding_error() {
        let err = ServerError::from(RankingError::ReferenceEmbedding(EmbeddingError::Timeout));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "EMBEDDING_ERROR");
        assert!(err.to_string().starts_with("AI API error: "));
    }

    #[test]
    fn test_dimension_mismatch_is_ranking_error() {
        let err = ServerError::from(RankingError::DimensionMismatch {
            candidate: "cv.pdf".to_string(),
            expected: 768,
            actual: 3072,
        });
        assert_eq!(err.error_code(), "RANKING_ERROR");
    }

    #[test]
    fn test_bad_request_status() {
        let err = ServerError::BadRequest("job_description is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
