//! Lemma report generation.
//!
//! This module turns a [`LemmaTable`] into output records and renders them
//! as a JSON array or a Markdown table.

use crate::analysis::{total_frequency, LemmaTable};
use crate::cli::SortOrder;
use crate::models::{CorpusStats, LemmaRecord, Report, ReportMetadata};
use anyhow::{Context, Result};
use std::path::Path;

/// Denormalize a lemma table into output records, in first-seen order.
pub fn build_records(table: &LemmaTable) -> Vec<LemmaRecord> {
    table
        .iter()
        .map(|info| LemmaRecord {
            lemma: info.lemma.clone(),
            pos: info.pos.clone(),
            inflection: info.inflection.clone(),
            total_frequency: total_frequency(table, &info.lemma),
            wordform_frequency: info.wordform_count,
        })
        .collect()
}

/// Reorder records. `FirstSeen` leaves them as built.
pub fn sort_records(records: &mut [LemmaRecord], order: SortOrder) {
    match order {
        SortOrder::FirstSeen => {}
        SortOrder::Lemma => records.sort_by(|a, b| a.lemma.cmp(&b.lemma)),
        SortOrder::Frequency => records.sort_by(|a, b| {
            b.wordform_frequency
                .cmp(&a.wordform_frequency)
                .then_with(|| a.lemma.cmp(&b.lemma))
        }),
    }
}

/// Drop records seen fewer than `min_frequency` times. Returns how many were dropped.
pub fn retain_min_frequency(records: &mut Vec<LemmaRecord>, min_frequency: usize) -> usize {
    let before = records.len();
    records.retain(|r| r.wordform_frequency >= min_frequency);
    before - records.len()
}

/// Render records as a pretty-printed JSON array.
///
/// Output is indented with two spaces and keeps non-ASCII text as-is.
pub fn generate_json_report(records: &[LemmaRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(Into::into)
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Lemma Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_lemma_table(&report.records));

    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();
    let CorpusStats {
        sentences,
        tokens,
        lemmas,
        tokens_without_feats,
    } = metadata.stats;

    section.push_str("## Corpus\n\n");
    section.push_str(&format!("- **Input:** `{}`\n", metadata.input));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Sentences:** {}\n", sentences));
    section.push_str(&format!("- **Tokens:** {}\n", tokens));
    section.push_str(&format!("- **Distinct lemmas:** {}\n", lemmas));
    section.push_str(&format!(
        "- **Tokens without features:** {}\n",
        tokens_without_feats
    ));
    if metadata.filtered_out > 0 {
        section.push_str(&format!(
            "- **Lemmas below minimum frequency:** {}\n",
            metadata.filtered_out
        ));
    }
    section.push('\n');

    section
}

fn generate_lemma_table(records: &[LemmaRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Lemmas\n\n");

    if records.is_empty() {
        section.push_str("No lemmas to report.\n");
        return section;
    }

    section.push_str("| Lemma | POS | Frequency | Inflections |\n");
    section.push_str("|:---|:---|---:|:---|\n");

    for record in records {
        let inflection = if record.inflection.is_empty() {
            "-".to_string()
        } else {
            record
                .inflection
                .iter()
                .map(|f| format!("`{}`", escape_cell(f)))
                .collect::<Vec<_>>()
                .join("<br>")
        };

        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&record.lemma),
            escape_cell(&record.pos),
            record.wordform_frequency,
            inflection
        ));
    }

    section
}

/// Feature strings use `|` as a separator, which would split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Write a rendered report to `path`, replacing any existing file.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
