//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use smartfit_documents::guess_media_type;
use smartfit_ranking::{Candidate, Ranker, RankingConfig, ScoredCandidate};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::data::{CANDIDATES, JOB_DESCRIPTION};
use crate::table::{results_table, snippet_table};

/// Characters of resume text shown by the demo.
pub const DEMO_SNIPPET_LENGTH: usize = 50;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = RankingConfig::load(cli.config.as_deref())?;
    if let Some(provider) = cli.provider {
        config.embedding.provider = provider;
    }

    match cli.command {
        Commands::Demo => {
            let ranker = Ranker::from_config(&demo_config(config))?;
            let results = run_demo(&ranker).await?;
            println!("\nMATCHING RESULTS:");
            println!("{}", snippet_table(&results));
        }
        Commands::Rank {
            reference,
            reference_file,
            files,
            json,
        } => {
            let reference = match (reference, reference_file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("a job description is required"),
            };

            let ranker = Ranker::from_config(&config)?;
            let results = rank_files(&ranker, &reference, &files).await?;
            if json {
                let body = serde_json::json!({ "matches": results });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", results_table(&results));
            }
        }
    }
    Ok(())
}

/// The sample resumes are short, so the demo drops the length floor and
/// shows a shorter snippet.
pub fn demo_config(mut config: RankingConfig) -> RankingConfig {
    config.ranking.min_text_length = 0;
    config.ranking.preview_length = DEMO_SNIPPET_LENGTH;
    config
}

/// Rank the built-in sample candidates against the sample job description.
pub async fn run_demo(ranker: &Ranker) -> anyhow::Result<Vec<ScoredCandidate>> {
    info!("Scanning {} candidates...", CANDIDATES.len());
    let candidates = CANDIDATES
        .iter()
        .map(|sample| Candidate::text(sample.name, sample.resume))
        .collect();
    Ok(ranker.rank(JOB_DESCRIPTION, candidates).await?)
}

/// Read every file and rank it. A file that cannot be read aborts the run.
pub async fn rank_files(
    ranker: &Ranker,
    reference: &str,
    files: &[PathBuf],
) -> anyhow::Result<Vec<ScoredCandidate>> {
    let mut candidates = Vec::with_capacity(files.len());
    for path in files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        candidates.push(Candidate::document(
            display_name(path),
            guess_media_type(path),
            bytes,
        ));
    }
    Ok(ranker.rank(reference, candidates).await?)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smartfit_embeddings::HashingProvider;
    use smartfit_ranking::CandidateStatus;
    use std::sync::Arc;

    fn hashing_ranker(config: &RankingConfig) -> Ranker {
        Ranker::builder()
            .with_provider(Arc::new(HashingProvider::new(512)))
            .with_settings(config.ranking.clone())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_demo_scores_every_sample() {
        let ranker = hashing_ranker(&demo_config(RankingConfig::default()));
        let results = run_demo(&ranker).await.unwrap();

        assert_eq!(results.len(), CANDIDATES.len());
        assert!(results.iter().all(|r| r.status == CandidateStatus::Success));
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // 50 characters plus the ellipsis.
        assert!(
            results
                .iter()
                .all(|r| r.preview.as_ref().is_some_and(|p| p.chars().count() == 53))
        );
    }

    #[tokio::test]
    async fn test_default_length_floor_would_reject_short_samples() {
        let ranker = hashing_ranker(&RankingConfig::default());
        let results = ranker
            .rank(
                JOB_DESCRIPTION,
                vec![Candidate::text("short", "Junior Developer.")],
            )
            .await
            .unwrap();
        assert_eq!(results[0].status, CandidateStatus::EmptyOrInvalidContent);
    }

    #[tokio::test]
    async fn test_rank_files_guesses_media_types() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("broken.pdf");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&pdf, b"%PDF-1.4 truncated").unwrap();
        std::fs::write(&txt, "Python engineer with AWS and Kafka").unwrap();

        let ranker = hashing_ranker(&RankingConfig::default());
        let results = rank_files(&ranker, JOB_DESCRIPTION, &[pdf, txt]).await.unwrap();

        assert_eq!(results.len(), 2);
        let status_of = |name: &str| {
            results
                .iter()
                .find(|r| r.identifier == name)
                .map(|r| r.status)
                .unwrap()
        };
        assert_eq!(status_of("broken.pdf"), CandidateStatus::EmptyOrInvalidContent);
        assert_eq!(status_of("notes.txt"), CandidateStatus::SkippedNotDocument);
    }

    #[tokio::test]
    async fn test_rank_files_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let ranker = hashing_ranker(&RankingConfig::default());

        let err = rank_files(&ranker, JOB_DESCRIPTION, &[dir.path().join("gone.pdf")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("gone.pdf"));
    }
}
