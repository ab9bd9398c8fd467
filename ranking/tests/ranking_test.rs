use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use smartfit_documents::{ExtractionError, PDF_MEDIA_TYPE};
use smartfit_embeddings::{EmbeddingRequest, EmbeddingResponse, HashingProvider};
use smartfit_ranking::{
    Candidate, CandidateStatus, DocumentExtractor, EmbeddingError, EmbeddingProvider, Ranker,
    RankingConfig, RankingError,
};

const REFERENCE: &str = "Python engineer with AWS experience";

/// Hashing provider that counts calls and can fail or resize chosen texts.
struct ScriptedProvider {
    inner: HashingProvider,
    calls: AtomicUsize,
    fail_on: Vec<&'static str>,
    shrink_on: Vec<&'static str>,
    delay_on: Vec<&'static str>,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            inner: HashingProvider::new(1024),
            calls: AtomicUsize::new(0),
            fail_on: Vec::new(),
            shrink_on: Vec::new(),
            delay_on: Vec::new(),
        }
    }

    fn failing_on(mut self, marker: &'static str) -> Self {
        self.fail_on.push(marker);
        self
    }

    fn shrinking_on(mut self, marker: &'static str) -> Self {
        self.shrink_on.push(marker);
        self
    }

    fn slow_on(mut self, marker: &'static str) -> Self {
        self.delay_on.push(marker);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    fn default_dimension(&self) -> usize {
        self.inner.default_dimension()
    }

    async fn embed(
        &self,
        mut request: EmbeddingRequest,
    ) -> smartfit_embeddings::Result<EmbeddingResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.delay_on.iter().any(|m| request.text.contains(m)) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        if self.fail_on.iter().any(|m| request.text.contains(m)) {
            return Err(EmbeddingError::ApiRequest {
                status: 503,
                message: "model overloaded".to_string(),
            });
        }
        if self.shrink_on.iter().any(|m| request.text.contains(m)) {
            request.dimensions = Some(16);
        }
        self.inner.embed(request).await
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Treats document bytes as UTF-8 text; `corrupt` bytes fail to extract.
#[derive(Default)]
struct StubExtractor {
    calls: AtomicUsize,
}

impl StubExtractor {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentExtractor for StubExtractor {
    fn supports(&self, _media_type: &str) -> bool {
        true
    }

    async fn extract(&self, _media_type: &str, bytes: Bytes) -> smartfit_documents::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if bytes.as_ref() == b"corrupt" {
            return Err(ExtractionError::Pdf("invalid xref table".to_string()));
        }
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

fn ranker_with(
    provider: Arc<ScriptedProvider>,
    extractor: Arc<StubExtractor>,
    min_text_length: usize,
) -> Ranker {
    Ranker::builder()
        .with_provider(provider)
        .with_extractor(extractor)
        .with_min_text_length(min_text_length)
        .build()
        .unwrap()
}

fn text_ranker(provider: Arc<ScriptedProvider>) -> Ranker {
    ranker_with(provider, Arc::new(StubExtractor::default()), 1)
}

#[tokio::test]
async fn test_relevant_candidate_ranks_first() {
    let provider = Arc::new(ScriptedProvider::new());
    let ranker = text_ranker(provider.clone());

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![
                Candidate::text("B", "Java developer"),
                Candidate::text("A", "Senior Python engineer, AWS certified"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].identifier, "A");
    assert_eq!(ranked[1].identifier, "B");
    assert!(ranked[0].score > ranked[1].score);
    assert!(ranked.iter().all(|c| c.status == CandidateStatus::Success));
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_backend_engineer_scenario() {
    let ranker = text_ranker(Arc::new(ScriptedProvider::new()));

    let ranked = ranker
        .rank(
            "Need a Python backend engineer with AWS and Kafka experience",
            vec![
                Candidate::document("B.pdf", PDF_MEDIA_TYPE, "Frontend designer, Figma, CSS"),
                Candidate::document(
                    "A.pdf",
                    PDF_MEDIA_TYPE,
                    "10 years Python, AWS, Kafka microservices",
                ),
            ],
        )
        .await
        .unwrap();

    let order: Vec<_> = ranked.iter().map(|c| c.identifier.as_str()).collect();
    assert_eq!(order, vec!["A.pdf", "B.pdf"]);
    assert!(ranked[0].score > ranked[1].score);
    assert!(ranked.iter().all(|c| c.status == CandidateStatus::Success));
}

#[tokio::test]
async fn test_zero_reference_vector_aborts_before_candidates() {
    let provider = Arc::new(ScriptedProvider::new());
    let ranker = text_ranker(provider.clone());

    let err = ranker
        .rank(
            "--- !!! ---",
            vec![
                Candidate::text("a", "Python engineer"),
                Candidate::text("b", "Kafka microservices"),
            ],
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RankingError::ReferenceEmbedding(EmbeddingError::DegenerateVector)
    ));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_short_text_is_reported_without_embedding() {
    let provider = Arc::new(ScriptedProvider::new());
    let ranker = ranker_with(provider.clone(), Arc::new(StubExtractor::default()), 50);

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![Candidate::document("short.pdf", PDF_MEDIA_TYPE, "Too short")],
        )
        .await
        .unwrap();

    assert_eq!(ranked[0].status, CandidateStatus::EmptyOrInvalidContent);
    assert_eq!(ranked[0].score, 0.0);
    assert_eq!(ranked[0].preview, None);
    assert!(ranked[0].detail.is_some());
    // Only the reference was embedded.
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_whitespace_only_text_is_empty() {
    let provider = Arc::new(ScriptedProvider::new());
    let ranker = text_ranker(provider.clone());

    let ranked = ranker
        .rank(REFERENCE, vec![Candidate::text("blank", " \n\t ")])
        .await
        .unwrap();

    assert_eq!(ranked[0].status, CandidateStatus::EmptyOrInvalidContent);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_non_pdf_is_skipped_before_extraction() {
    let provider = Arc::new(ScriptedProvider::new());
    let extractor = Arc::new(StubExtractor::default());
    let ranker = ranker_with(provider.clone(), extractor.clone(), 1);

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![Candidate::document(
                "resume.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "Python engineer",
            )],
        )
        .await
        .unwrap();

    assert_eq!(ranked[0].status, CandidateStatus::SkippedNotDocument);
    assert_eq!(ranked[0].score, 0.0);
    assert_eq!(extractor.calls(), 0);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_pdf_text_is_extracted_and_previewed() {
    let provider = Arc::new(ScriptedProvider::new());
    let extractor = Arc::new(StubExtractor::default());
    let ranker = ranker_with(provider.clone(), extractor.clone(), 1);

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![Candidate::document(
                "cv.pdf",
                "Application/PDF; charset=binary",
                "  Python engineer on AWS  ",
            )],
        )
        .await
        .unwrap();

    assert_eq!(extractor.calls(), 1);
    assert_eq!(ranked[0].status, CandidateStatus::Success);
    assert_eq!(ranked[0].preview.as_deref(), Some("Python engineer on AWS..."));
    assert!(ranked[0].score > 0.0);
}

#[tokio::test]
async fn test_extraction_failure_is_per_candidate() {
    let provider = Arc::new(ScriptedProvider::new());
    let ranker = ranker_with(provider, Arc::new(StubExtractor::default()), 1);

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![
                Candidate::document("broken.pdf", PDF_MEDIA_TYPE, "corrupt"),
                Candidate::text("ok", "Python engineer"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(ranked[0].identifier, "ok");
    assert_eq!(ranked[1].identifier, "broken.pdf");
    assert_eq!(ranked[1].status, CandidateStatus::EmptyOrInvalidContent);
    assert!(
        ranked[1]
            .detail
            .as_deref()
            .is_some_and(|d| d.contains("invalid xref table"))
    );
}

#[tokio::test]
async fn test_candidate_embedding_failure_does_not_abort() {
    let provider = Arc::new(ScriptedProvider::new().failing_on("overload"));
    let ranker = text_ranker(provider);

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![
                Candidate::text("bad", "overload me please"),
                Candidate::text("good", "Python AWS engineer"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].identifier, "good");
    assert_eq!(ranked[1].status, CandidateStatus::EmbeddingFailed);
    assert_eq!(ranked[1].score, 0.0);
}

#[tokio::test]
async fn test_reference_failure_aborts_call() {
    let provider = Arc::new(ScriptedProvider::new().failing_on("AWS experience"));
    let ranker = text_ranker(provider.clone());

    let err = ranker
        .rank(
            REFERENCE,
            vec![Candidate::text("a", "Python engineer"), Candidate::text("b", "Java")],
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RankingError::ReferenceEmbedding(EmbeddingError::ApiRequest { status: 503, .. })
    ));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_dimension_mismatch_aborts_call() {
    let provider = Arc::new(ScriptedProvider::new().shrinking_on("tiny"));
    let ranker = text_ranker(provider);

    let err = ranker
        .rank(REFERENCE, vec![Candidate::text("odd", "tiny vector")])
        .await
        .unwrap_err();

    match err {
        RankingError::DimensionMismatch {
            candidate,
            expected,
            actual,
        } => {
            assert_eq!(candidate, "odd");
            assert_eq!(expected, 1024);
            assert_eq!(actual, 16);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_every_candidate_is_reported_in_score_order() {
    let provider = Arc::new(ScriptedProvider::new().slow_on("slow"));
    let ranker = Ranker::builder()
        .with_provider(provider)
        .with_extractor(Arc::new(StubExtractor::default()))
        .with_min_text_length(5)
        .with_max_concurrency(3)
        .build()
        .unwrap();

    let candidates = vec![
        Candidate::text("slow-match", "slow Python engineer with AWS experience"),
        Candidate::text("skip", "x"),
        Candidate::document("notes.txt", "text/plain", "Python engineer"),
        Candidate::text("partial", "Python"),
        Candidate::text("unrelated", "Gardening and baking"),
    ];

    let ranked = ranker.rank(REFERENCE, candidates).await.unwrap();

    assert_eq!(ranked.len(), 5);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(ranked[0].identifier, "slow-match");

    let mut identifiers: Vec<_> = ranked.iter().map(|c| c.identifier.as_str()).collect();
    identifiers.sort_unstable();
    assert_eq!(
        identifiers,
        vec!["notes.txt", "partial", "skip", "slow-match", "unrelated"]
    );
}

#[tokio::test]
async fn test_ties_keep_input_order() {
    let ranker = text_ranker(Arc::new(ScriptedProvider::new()));

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![
                Candidate::text("first", "Python engineer"),
                Candidate::text("second", "Python engineer"),
                Candidate::document("a.doc", "application/msword", "x"),
                Candidate::document("b.doc", "application/msword", "x"),
            ],
        )
        .await
        .unwrap();

    let order: Vec<_> = ranked.iter().map(|c| c.identifier.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "a.doc", "b.doc"]);
}

#[tokio::test]
async fn test_ranking_is_deterministic() {
    let ranker = text_ranker(Arc::new(ScriptedProvider::new()));
    let candidates = vec![
        Candidate::text("a", "Python AWS"),
        Candidate::text("b", "Kafka microservices"),
        Candidate::text("c", "Engineer with experience"),
    ];

    let first = ranker.rank(REFERENCE, candidates.clone()).await.unwrap();
    let second = ranker.rank(REFERENCE, candidates).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_results_serialize_with_wire_field_names() {
    let ranker = text_ranker(Arc::new(ScriptedProvider::new()));

    let ranked = ranker
        .rank(
            REFERENCE,
            vec![Candidate::document("photo.png", "image/png", "x")],
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&ranked).unwrap();
    assert_eq!(json[0]["filename"], "photo.png");
    assert_eq!(json[0]["score"], 0.0);
    assert_eq!(json[0]["status"], "Skipped (Not PDF)");
    assert!(json[0].get("preview").is_none());
}

#[tokio::test]
async fn test_ranker_from_toml_config() {
    let config = RankingConfig::from_toml_str(
        r#"
        [embedding]
        provider = "hashing"
        dimensions = 256

        [ranking]
        min_text_length = 3
        preview_length = 6
        "#,
    )
    .unwrap();

    let ranker = Ranker::from_config(&config).unwrap();
    assert_eq!(ranker.provider().name(), "hashing");

    let ranked = ranker
        .rank(REFERENCE, vec![Candidate::text("a", "Python engineer")])
        .await
        .unwrap();

    assert_eq!(ranked[0].preview.as_deref(), Some("Python..."));
}
