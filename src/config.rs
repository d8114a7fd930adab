//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.lemmatally.toml` files.

use crate::cli::{Args, OutputFormat, SortOrder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".lemmatally.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input and output paths.
    #[serde(default)]
    pub io: IoConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    /// Annotated corpus to read.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Where the report is written.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("sample_parsed_sentences.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("output.json")
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Record order.
    #[serde(default)]
    pub sort: SortOrder,

    /// Lemmas seen fewer times than this are left out.
    #[serde(default = "default_min_frequency")]
    pub min_frequency: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            sort: SortOrder::default(),
            min_frequency: default_min_frequency(),
        }
    }
}

fn default_min_frequency() -> usize {
    1
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.lemmatally.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when given explicitly.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref input) = args.input {
            self.io.input = input.clone();
        }
        if let Some(ref output) = args.output {
            self.io.output = output.clone();
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(sort) = args.sort {
            self.report.sort = sort;
        }
        if let Some(min_frequency) = args.min_frequency {
            self.report.min_frequency = min_frequency;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check values that TOML alone cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if self.report.min_frequency == 0 {
            anyhow::bail!("report.min_frequency must be at least 1");
        }
        if self.io.input == self.io.output {
            anyhow::bail!(
                "Input and output must be different files: {}",
                self.io.input.display()
            );
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
