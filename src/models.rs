//! Data models for the lemma aggregator.
//!
//! This module contains the input document shape (sentences of annotated
//! tokens), the per-lemma accumulator and the output records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed annotation document.
///
/// Only `sentences` is required; any other top-level keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Sentences in document order.
    pub sentences: Vec<Sentence>,
}

/// A single annotated sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sentence {
    /// Tokens in sentence order.
    pub tokens: Vec<Token>,
}

/// A single annotated token. Read-only once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form, if the annotator provided one.
    #[serde(default)]
    pub text: Option<String>,
    /// Dictionary form.
    pub lemma: String,
    /// Fine-grained part-of-speech tag.
    #[serde(rename = "pos_finegrained")]
    pub pos: String,
    /// Inflection feature string, e.g. `Number=Sing|Case=Nom`.
    #[serde(default)]
    pub feats: Option<String>,
}

impl Token {
    /// Returns the feature string when it is present and non-empty.
    pub fn inflection(&self) -> Option<&str> {
        self.feats.as_deref().filter(|f| !f.is_empty())
    }
}

/// Accumulated statistics for one lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaInfo {
    /// The lemma this entry is keyed by.
    pub lemma: String,
    /// POS tag of the first token seen with this lemma.
    pub pos: String,
    /// Distinct non-empty feature strings, in first-seen order.
    pub inflection: Vec<String>,
    /// Number of tokens seen with this lemma.
    pub wordform_count: usize,
}

impl LemmaInfo {
    /// Creates an entry with no observations yet.
    pub fn new(lemma: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            pos: pos.into(),
            inflection: Vec::new(),
            wordform_count: 0,
        }
    }

    /// Records one token occurrence for this lemma.
    pub fn observe(&mut self, token: &Token) {
        if let Some(feats) = token.inflection() {
            if !self.inflection.iter().any(|f| f == feats) {
                self.inflection.push(feats.to_string());
            }
        }
        self.wordform_count += 1;
    }
}

/// One row of the output report.
///
/// `total_frequency` and `wordform_frequency` are both derived from the same
/// per-lemma counter and therefore always equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRecord {
    pub lemma: String,
    pub pos: String,
    pub inflection: Vec<String>,
    pub total_frequency: usize,
    pub wordform_frequency: usize,
}

/// Corpus-level counts gathered alongside the aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of sentences in the document.
    pub sentences: usize,
    /// Number of tokens across all sentences.
    pub tokens: usize,
    /// Number of distinct lemmas.
    pub lemmas: usize,
    /// Tokens whose `feats` was absent, null or empty.
    pub tokens_without_feats: usize,
}

/// Metadata shown in the Markdown report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the input corpus.
    pub input: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Corpus statistics.
    pub stats: CorpusStats,
    /// Records dropped by the minimum frequency filter.
    pub filtered_out: usize,
}

/// A complete lemma report ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub records: Vec<LemmaRecord>,
}
