//! SmartFit Server - HTTP API for ranking resumes against a job description
//!
//! ## Endpoints
//!
//! - `POST /rank-candidates`: multipart form with a `job_description` field
//!   and one or more `files` parts; returns `{"matches": [...]}` best first
//! - `GET /health`: liveness plus the active embedding provider
//!
//! Errors use a JSON body of the form `{"error": {"code", "message"}}`.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{LogFormat, ServerConfig, ServerSettings};
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use routes::health::HealthResponse;
pub use routes::rank::RankResponse;
pub use server::{build_router, start_server};
pub use state::AppState;
