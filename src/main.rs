//! lemmatally - per-lemma statistics from annotated corpora
//!
//! A CLI tool that reads sentences of annotated tokens and writes one
//! record per lemma with its POS tag, inflection features and frequency.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (bad arguments, unreadable or malformed input, write failure)

mod analysis;
mod cli;
mod config;
mod corpus;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use models::{Report, ReportMetadata};
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so config verbosity applies
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("lemmatally v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    if let Err(e) = run(&config) {
        error!("Run failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .lemmatally.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref config_path) => Config::load(config_path)?,
        None => match Config::load_default() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("Warning: ignoring {}: {:#}", DEFAULT_CONFIG_FILE, e);
                Config::default()
            }
        },
    };

    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    lemmas: usize,
    written: usize,
}

/// Read, aggregate and write. Nothing is written unless every earlier step succeeds.
fn run(config: &Config) -> Result<RunSummary> {
    let start_time = Instant::now();
    let input = &config.io.input;
    let output = &config.io.output;

    info!("Reading corpus: {}", input.display());
    let document = corpus::load_document(input)?;

    let stats = analysis::corpus_stats(&document);
    info!(
        "Parsed {} sentences, {} tokens",
        stats.sentences, stats.tokens
    );

    let table = analysis::aggregate(&document);
    info!("Aggregated {} distinct lemmas", table.len());

    let mut records = report::build_records(&table);
    let filtered_out = report::retain_min_frequency(&mut records, config.report.min_frequency);
    if filtered_out > 0 {
        debug!(
            "Dropped {} lemmas below frequency {}",
            filtered_out, config.report.min_frequency
        );
    }
    report::sort_records(&mut records, config.report.sort);

    let content = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&records)?,
        OutputFormat::Markdown => report::generate_markdown_report(&Report {
            metadata: ReportMetadata {
                input: input.display().to_string(),
                generated_at: Utc::now(),
                stats,
                filtered_out,
            },
            records: records.clone(),
        }),
    };

    report::write_report(output, &content)?;

    info!(
        "Wrote {} records to {} in {:.2}s",
        records.len(),
        output.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(RunSummary {
        lemmas: table.len(),
        written: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SortOrder;
    use std::path::{Path, PathBuf};

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name)
    }

    fn config_for(input: &Path, output: &Path) -> Config {
        let mut config = Config::default();
        config.io.input = input.to_path_buf();
        config.io.output = output.to_path_buf();
        config
    }

    fn read_records(path: &Path) -> Vec<models::LemmaRecord> {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_run_on_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.json");
        let config = config_for(&fixture("sample_parsed_sentences.json"), &output);

        let summary = run(&config).unwrap();
        assert_eq!(summary, RunSummary { lemmas: 6, written: 6 });

        let records = read_records(&output);
        let lemmas: Vec<_> = records.iter().map(|r| r.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["der", "Hund", "laufen", "schnell", ".", "Katze"]);

        let der = &records[0];
        assert_eq!(der.pos, "ART");
        assert_eq!(
            der.inflection,
            vec![
                "Case=Nom|Definite=Def|Gender=Masc|Number=Sing",
                "Case=Nom|Definite=Def|Gender=Fem|Number=Sing"
            ]
        );
        assert_eq!(der.wordform_frequency, 2);
        assert_eq!(der.total_frequency, 2);

        let laufen = &records[2];
        assert_eq!(laufen.wordform_frequency, 2);
        assert_eq!(laufen.inflection.len(), 1);

        let period = &records[4];
        assert!(period.inflection.is_empty());

        let raw = std::fs::read_to_string(&output).unwrap();
        assert!(raw.contains("Katze"));
        assert!(raw.starts_with("[\n  {"));
    }

    #[test]
    fn test_run_example_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        std::fs::write(
            &input,
            r#"{"sentences": [
                {"tokens": [
                    {"lemma": "run", "pos_finegrained": "VERB", "feats": "Tense=Past"},
                    {"lemma": "run", "pos_finegrained": "VERB", "feats": "Tense=Past"}
                ]},
                {"tokens": [
                    {"lemma": "dog", "pos_finegrained": "NOUN", "feats": null}
                ]}
            ]}"#,
        )
        .unwrap();

        run(&config_for(&input, &output)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"lemma": "run", "pos": "VERB", "inflection": ["Tense=Past"], "total_frequency": 2, "wordform_frequency": 2},
                {"lemma": "dog", "pos": "NOUN", "inflection": [], "total_frequency": 1, "wordform_frequency": 1}
            ])
        );
    }

    #[test]
    fn test_run_empty_sentences() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, r#"{"sentences": []}"#).unwrap();

        let summary = run(&config_for(&input, &output)).unwrap();
        assert_eq!(summary.written, 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
    }

    #[test]
    fn test_run_missing_key_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        std::fs::write(
            &input,
            r#"{"sentences": [{"tokens": [{"pos_finegrained": "NOUN"}]}]}"#,
        )
        .unwrap();

        let err = run(&config_for(&input, &output)).unwrap_err();
        assert!(format!("{:#}", err).contains("lemma"));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_markdown_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("lemmas.md");
        let mut config = config_for(&fixture("sample_parsed_sentences.json"), &output);
        config.report.format = OutputFormat::Markdown;
        config.report.sort = SortOrder::Frequency;
        config.report.min_frequency = 2;

        let summary = run(&config).unwrap();
        assert_eq!(summary, RunSummary { lemmas: 6, written: 3 });

        let markdown = std::fs::read_to_string(&output).unwrap();
        assert!(markdown.contains("- **Sentences:** 2"));
        assert!(markdown.contains("- **Tokens:** 9"));
        assert!(markdown.contains("- **Tokens without features:** 2"));
        assert!(markdown.contains("- **Lemmas below minimum frequency:** 3"));

        let period = markdown.find("| . |").unwrap();
        let der = markdown.find("| der |").unwrap();
        let laufen = markdown.find("| laufen |").unwrap();
        assert!(period < der && der < laufen);
        assert!(!markdown.contains("| Hund |"));
        assert!(!markdown.contains("| schnell |"));
    }
}
