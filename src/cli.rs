//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::Target;
use crate::models::AnalysisKind;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Journal Lens - AI summaries, sentiment and insights for your journal
///
/// Sends a journal entry to the AI journal backend and shows the results.
/// Without a text source on a terminal, opens the interactive screen.
///
/// Examples:
///   journal-lens
///   journal-lens --text "I had a wonderful day at the park." --kind sentiment
///   journal-lens --file today.txt --format json --output today.json
///   echo "Long week." | journal-lens --target hosted
///   journal-lens --health
///   journal-lens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Journal text to analyze
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the journal entry from a file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Run a single analysis kind instead of all three
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<AnalysisKind>,

    /// Open the interactive journal screen
    #[arg(short, long, conflicts_with_all = ["text", "file", "kind", "health"])]
    pub interactive: bool,

    /// Check that the AI backend is reachable and healthy
    #[arg(long)]
    pub health: bool,

    /// Backend deployment to use (local, hosted)
    #[arg(long, value_name = "TARGET")]
    pub target: Option<Target>,

    /// Explicit backend base URL; overrides --target
    ///
    /// Can also be set via JOURNAL_LENS_API_URL or .journal-lens.toml.
    #[arg(long, value_name = "URL", env = "JOURNAL_LENS_API_URL")]
    pub api_url: Option<String>,

    /// Output format for results (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Hide model, word count and themes on result cards
    #[arg(long)]
    pub no_metadata: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .journal-lens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .journal-lens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Result cards as text (default)
    #[default]
    Text,
    /// JSON document
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref path) = self.file {
            if !path.is_file() {
                return Err(format!("Journal file does not exist: {}", path.display()));
            }
        }

        if self.interactive && self.output.is_some() {
            return Err("--output cannot be used with --interactive".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether a text source was given on the command line.
    pub fn has_text_source(&self) -> bool {
        self.text.is_some() || self.file.is_some()
    }

    /// Kinds a one-shot run should analyze.
    pub fn requested_kinds(&self) -> Vec<AnalysisKind> {
        match self.kind {
            Some(kind) => vec![kind],
            None => AnalysisKind::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_args() -> Args {
        Args {
            text: Some("I had a wonderful day at the park.".to_string()),
            file: None,
            kind: None,
            interactive: false,
            health: false,
            target: None,
            api_url: None,
            format: None,
            output: None,
            no_metadata: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_kind_and_text() {
        let args = Args::try_parse_from([
            "journal-lens",
            "--text",
            "hello",
            "--kind",
            "sentiment",
            "--target",
            "hosted",
        ])
        .unwrap();
        assert_eq!(args.text.as_deref(), Some("hello"));
        assert_eq!(args.kind, Some(AnalysisKind::Sentiment));
        assert_eq!(args.target, Some(Target::Hosted));
        assert_eq!(args.requested_kinds(), vec![AnalysisKind::Sentiment]);
    }

    #[test]
    fn test_interactive_conflicts_with_text() {
        assert!(Args::try_parse_from(["journal-lens", "-i", "--text", "x"]).is_err());
    }

    #[test]
    fn test_requested_kinds_defaults_to_all() {
        let args = make_args();
        assert_eq!(args.requested_kinds(), AnalysisKind::ALL.to_vec());
        assert!(args.has_text_source());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut args = make_args();
        args.api_url = Some("localhost:8000".to_string());
        assert!(args.validate().is_err());

        args.api_url = Some("http://localhost:8000".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_file() {
        let mut args = make_args();
        args.text = None;
        args.file = Some(PathBuf::from("/definitely/not/here.txt"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
