use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Liveness response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub model: String,
}

/// Health check endpoint (liveness).
/// Reports the active embedding provider without calling it.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.ranker.provider();
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: provider.name().to_string(),
        model: provider.default_model().to_string(),
    })
}
