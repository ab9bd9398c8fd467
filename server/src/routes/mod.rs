//! HTTP route handlers.

pub mod health;
pub mod rank;

use crate::error::ServerError;

/// Fallback for unknown routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
