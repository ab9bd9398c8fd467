//! Ranking engine implementation.

use std::cmp::Reverse;
use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use ordered_float::OrderedFloat;
use smartfit_documents::{CompositeExtractor, DocumentExtractor, is_accepted};
use smartfit_embeddings::{
    Embedding, EmbeddingError, EmbeddingProvider, EmbeddingRequest, magnitude,
    similarity_percent, validate_input,
};
use tracing::{debug, error, info, warn};

use crate::candidate::{
    Candidate, CandidateOutcome, CandidateSource, CandidateStatus, ScoredCandidate, make_preview,
};
use crate::config::{RankingConfig, RankingSettings};
use crate::error::{RankingError, Result};

/// Ranks candidate documents against a reference text.
///
/// The ranker holds no per-request state: build it once at startup and
/// share it (it is cheap to clone) with every handler or invocation.
///
/// For each call it:
/// - embeds the reference text once (failure aborts the call)
/// - processes every candidate independently, with bounded concurrency
/// - returns one row per candidate, sorted by score, ties in input order
#[derive(Clone)]
pub struct Ranker {
    provider: Arc<dyn EmbeddingProvider>,
    extractor: Arc<dyn DocumentExtractor>,
    settings: RankingSettings,
}

impl Ranker {
    /// Create a new ranker builder.
    pub fn builder() -> RankerBuilder {
        RankerBuilder::new()
    }

    /// Create a ranker from explicit parts.
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        extractor: Arc<dyn DocumentExtractor>,
        settings: RankingSettings,
    ) -> Self {
        Self {
            provider,
            extractor,
            settings,
        }
    }

    /// Build the configured provider and the default extractors.
    pub fn from_config(config: &RankingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.embedding.build_provider(),
            Arc::new(CompositeExtractor::with_defaults()),
            config.ranking.clone(),
        ))
    }

    /// Settings in effect.
    pub fn settings(&self) -> &RankingSettings {
        &self.settings
    }

    /// The embedding provider in use.
    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    /// Embed one text, rejecting blank input before the provider is called.
    pub async fn embed(&self, text: &str) -> smartfit_embeddings::Result<Embedding> {
        validate_input(text)?;
        let response = self.provider.embed(EmbeddingRequest::new(text)).await?;
        Ok(response.embedding)
    }

    /// Rank `candidates` against `reference_text`.
    ///
    /// Returns exactly one [`ScoredCandidate`] per input, sorted by score
    /// descending with ties kept in input order. Only a reference embedding
    /// failure (including a zero reference vector) or a provider dimension
    /// mismatch fails the whole call.
    pub async fn rank(
        &self,
        reference_text: &str,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<ScoredCandidate>> {
        info!(
            "Ranking {} candidates with provider '{}' ({})",
            candidates.len(),
            self.provider.name(),
            self.provider.default_model()
        );

        let reference = self.embed(reference_text).await.map_err(|e| {
            error!("Failed to embed reference text: {e}");
            RankingError::ReferenceEmbedding(e)
        })?;
        debug!("Reference embedding has {} dimensions", reference.len());

        // A zero reference has no direction to compare against.
        let norm = magnitude(&reference);
        if reference.is_empty() || norm == 0.0 || !norm.is_finite() {
            error!("Reference embedding is empty or zero, nothing can be ranked");
            return Err(RankingError::ReferenceEmbedding(
                EmbeddingError::DegenerateVector,
            ));
        }

        let reference = reference.as_slice();
        let mut ranked: Vec<ScoredCandidate> = stream::iter(candidates)
            .map(move |candidate| self.process_candidate(reference, candidate))
            .buffered(self.settings.max_concurrency.max(1))
            .try_collect()
            .await?;

        // Stable: equal scores keep their input order.
        ranked.sort_by_key(|c| Reverse(OrderedFloat(c.score)));

        log_summary(&ranked);
        Ok(ranked)
    }

    async fn process_candidate(
        &self,
        reference: &[f32],
        candidate: Candidate,
    ) -> Result<ScoredCandidate> {
        let Candidate { id, source } = candidate;
        let outcome = self.evaluate(&id, reference, source).await?;

        match &outcome {
            CandidateOutcome::Scored { score, .. } => debug!("Scored {id}: {score:.2}"),
            CandidateOutcome::Skipped { detail } => debug!("Skipped {id}: {detail}"),
            CandidateOutcome::InvalidContent { detail }
            | CandidateOutcome::EmbeddingFailed { detail } => warn!("Candidate {id} failed: {detail}"),
        }

        Ok(outcome.into_scored(id))
    }

    async fn evaluate(
        &self,
        id: &str,
        reference: &[f32],
        source: CandidateSource,
    ) -> Result<CandidateOutcome> {
        let text = match source {
            CandidateSource::Text(text) => text,
            CandidateSource::Document { media_type, bytes } => {
                if !is_accepted(&media_type, &self.settings.accepted_media_types) {
                    return Ok(CandidateOutcome::Skipped {
                        detail: format!("media type '{media_type}' is not an accepted document type"),
                    });
                }
                match self.extractor.extract(&media_type, bytes).await {
                    Ok(text) => text,
                    Err(e) => {
                        return Ok(CandidateOutcome::InvalidContent {
                            detail: format!("text extraction failed: {e}"),
                        });
                    }
                }
            }
        };

        let length = text.trim().chars().count();
        if length == 0 || length < self.settings.min_text_length {
            return Ok(CandidateOutcome::InvalidContent {
                detail: format!(
                    "text has {length} characters, minimum is {}",
                    self.settings.min_text_length
                ),
            });
        }

        let vector = match self.embed(&text).await {
            Ok(vector) => vector,
            Err(e) => {
                return Ok(CandidateOutcome::EmbeddingFailed {
                    detail: e.to_string(),
                });
            }
        };

        let score = match similarity_percent(reference, &vector) {
            Ok(score) => score,
            Err(EmbeddingError::DimensionMismatch { expected, actual }) => {
                error!("Provider returned {actual} dimensions for {id}, reference has {expected}");
                return Err(RankingError::DimensionMismatch {
                    candidate: id.to_string(),
                    expected,
                    actual,
                });
            }
            Err(e) => {
                return Ok(CandidateOutcome::EmbeddingFailed {
                    detail: e.to_string(),
                });
            }
        };

        let score = if self.settings.clamp_negative_scores {
            score.clamp(0.0, 100.0)
        } else {
            score
        };

        Ok(CandidateOutcome::Scored {
            score,
            preview: make_preview(&text, self.settings.preview_length),
        })
    }
}

fn log_summary(ranked: &[ScoredCandidate]) {
    let count = |status: CandidateStatus| ranked.iter().filter(|c| c.status == status).count();
    info!(
        "Ranked {} candidates: {} scored, {} skipped, {} empty or invalid, {} embedding failures",
        ranked.len(),
        count(CandidateStatus::Success),
        count(CandidateStatus::SkippedNotDocument),
        count(CandidateStatus::EmptyOrInvalidContent),
        count(CandidateStatus::EmbeddingFailed),
    );
}

/// Builder for [`Ranker`].
pub struct RankerBuilder {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    extractor: Arc<dyn DocumentExtractor>,
    settings: RankingSettings,
}

impl RankerBuilder {
    /// Create a new builder with default settings and extractors.
    pub fn new() -> Self {
        Self {
            provider: None,
            extractor: Arc::new(CompositeExtractor::with_defaults()),
            settings: RankingSettings::default(),
        }
    }

    /// Set the embedding provider.
    pub fn with_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the document extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace all settings.
    pub fn with_settings(mut self, settings: RankingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the minimum text length.
    pub fn with_min_text_length(mut self, length: usize) -> Self {
        self.settings.min_text_length = length;
        self
    }

    /// Set the preview length.
    pub fn with_preview_length(mut self, length: usize) -> Self {
        self.settings.preview_length = length;
        self
    }

    /// Set the candidate concurrency limit.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.settings.max_concurrency = limit;
        self
    }

    /// Set the media types treated as documents.
    pub fn with_accepted_media_types<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.accepted_media_types = media_types.into_iter().map(Into::into).collect();
        self
    }

    /// Clamp negative scores to zero.
    pub fn with_clamped_scores(mut self, clamp: bool) -> Self {
        self.settings.clamp_negative_scores = clamp;
        self
    }

    /// Build the ranker.
    pub fn build(self) -> Result<Ranker> {
        let provider = self
            .provider
            .ok_or_else(|| RankingError::Config("an embedding provider is required".to_string()))?;
        if self.settings.max_concurrency == 0 {
            return Err(RankingError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(Ranker::new(provider, self.extractor, self.settings))
    }
}

impl Default for RankerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
