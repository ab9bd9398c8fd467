//! Command-line definitions for `smartfit`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use smartfit_ranking::EmbeddingProviderType;

#[derive(Debug, Parser)]
#[command(
    name = "smartfit",
    about = "Rank resumes against a job description by semantic similarity",
    version
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Embedding provider (gemini, openai or hashing)
    #[arg(long, global = true)]
    pub provider: Option<EmbeddingProviderType>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rank the built-in sample candidates against the sample job description
    Demo,

    /// Rank resume files against a job description
    #[command(group(
        ArgGroup::new("reference_source")
            .required(true)
            .args(["reference", "reference_file"]),
    ))]
    Rank {
        /// Job description text
        #[arg(long)]
        reference: Option<String>,

        /// File containing the job description
        #[arg(long)]
        reference_file: Option<PathBuf>,

        /// Resume files; the media type is guessed from the extension
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print `{"matches": [...]}` instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rank() {
        let cli = Cli::try_parse_from([
            "smartfit",
            "--provider",
            "hashing",
            "rank",
            "--reference",
            "Python engineer",
            "a.pdf",
            "b.pdf",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.provider, Some(EmbeddingProviderType::Hashing));
        match cli.command {
            Commands::Rank {
                reference,
                reference_file,
                files,
                json,
            } => {
                assert_eq!(reference.as_deref(), Some("Python engineer"));
                assert_eq!(reference_file, None);
                assert_eq!(files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
                assert!(json);
            }
            Commands::Demo => panic!("expected rank"),
        }
    }

    #[test]
    fn test_reference_sources_are_exclusive() {
        let result = Cli::try_parse_from([
            "smartfit",
            "rank",
            "--reference",
            "text",
            "--reference-file",
            "jd.txt",
            "a.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reference_is_required() {
        assert!(Cli::try_parse_from(["smartfit", "rank", "a.pdf"]).is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(Cli::try_parse_from(["smartfit", "--provider", "cohere", "demo"]).is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["smartfit", "demo", "--config", "smartfit.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("smartfit.toml")));
    }
}
