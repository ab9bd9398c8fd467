//! `POST /rank-candidates`: rank uploaded resumes against a job description.

use std::path::Path;

use axum::Json;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use smartfit_documents::guess_media_type;
use smartfit_ranking::{Candidate, ScoredCandidate};
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Multipart field carrying the reference text.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// Multipart field carrying one uploaded candidate; may repeat.
pub const FILES_FIELD: &str = "files";

/// Ranked results, best match first.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<ScoredCandidate>,
}

pub async fn rank_candidates(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<Json<RankResponse>> {
    let mut job_description: Option<String> = None;
    let mut candidates = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            JOB_DESCRIPTION_FIELD => job_description = Some(field.text().await?),
            FILES_FIELD => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("upload-{}", candidates.len() + 1));
                // A part without a declared type falls back to its extension.
                let media_type = field
                    .content_type()
                    .map(str::to_owned)
                    .unwrap_or_else(|| guess_media_type(Path::new(&filename)));
                let bytes = field.bytes().await?;
                debug!("Received {filename} ({media_type}, {} bytes)", bytes.len());
                candidates.push(Candidate::document(filename, media_type, bytes));
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let job_description = job_description
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("{JOB_DESCRIPTION_FIELD} is required")))?;
    if candidates.is_empty() {
        return Err(ServerError::BadRequest(format!(
            "at least one '{FILES_FIELD}' part is required"
        )));
    }

    info!("Ranking {} uploaded candidates", candidates.len());
    let matches = state.ranker.rank(&job_description, candidates).await?;

    Ok(Json(RankResponse { matches }))
}
