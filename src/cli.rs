//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation of conflicting options.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// lemmatally - per-lemma statistics from annotated corpora
///
/// Reads a JSON document of sentences with annotated tokens and writes
/// one record per lemma: its POS tag, the distinct inflection feature
/// strings seen, and how often it occurred.
///
/// Examples:
///   lemmatally --input parsed.json --output lemmas.json
///   lemmatally -i parsed.json --sort frequency --min-frequency 2
///   lemmatally -i parsed.json -o lemmas.md --format markdown
///   lemmatally --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Annotated corpus to read
    ///
    /// Falls back to `io.input` from the config file.
    #[arg(short, long, value_name = "FILE", env = "LEMMATALLY_INPUT")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Falls back to `io.output` from the config file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .lemmatally.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format (json, markdown)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Record order (first-seen, lemma, frequency)
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<SortOrder>,

    /// Drop lemmas seen fewer than this many times
    #[arg(long, value_name = "COUNT")]
    pub min_frequency: Option<usize>,

    /// Generate a default .lemmatally.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of lemma records (default)
    #[default]
    Json,
    /// Markdown table with corpus statistics
    Markdown,
}

/// Order of records in the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Order in which lemmas first appear in the corpus (default)
    #[default]
    FirstSeen,
    /// Lexicographic by lemma
    Lemma,
    /// Most frequent first, ties broken by lemma
    Frequency,
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

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.min_frequency == Some(0) {
            return Err("Minimum frequency must be at least 1".to_string());
        }

        if let Some(ref input) = self.input {
            if input.is_dir() {
                return Err(format!("Input path is a directory: {}", input.display()));
            }
        }

        if let (Some(input), Some(output)) = (&self.input, &self.output) {
            if input == output {
                return Err("Input and output must be different files".to_string());
            }
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
}
