//! Lemma aggregation and corpus statistics.
//!
//! This module folds the tokens of a document into one [`LemmaInfo`] per
//! distinct lemma and computes corpus-level counts.

use crate::models::{CorpusStats, Document, LemmaInfo, Token};
use std::collections::{HashMap, HashSet};

/// Lemma to [`LemmaInfo`] mapping that remembers first-seen order.
#[derive(Debug, Clone, Default)]
pub struct LemmaTable {
    entries: Vec<LemmaInfo>,
    index: HashMap<String, usize>,
}

impl LemmaTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one token, creating the lemma entry on first sight.
    pub fn observe(&mut self, token: &Token) {
        let slot = match self.index.get(&token.lemma) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(LemmaInfo::new(&token.lemma, &token.pos));
                self.index.insert(token.lemma.clone(), slot);
                slot
            }
        };

        self.entries[slot].observe(token);
    }

    /// Looks up a lemma.
    pub fn get(&self, lemma: &str) -> Option<&LemmaInfo> {
        self.index.get(lemma).map(|&slot| &self.entries[slot])
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &LemmaInfo> {
        self.entries.iter()
    }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate every token of every sentence into a [`LemmaTable`].
pub fn aggregate(document: &Document) -> LemmaTable {
    let mut table = LemmaTable::new();

    for sentence in &document.sentences {
        for token in &sentence.tokens {
            table.observe(token);
        }
    }

    table
}

/// Compute corpus-level counts for a document.
pub fn corpus_stats(document: &Document) -> CorpusStats {
    let mut stats = CorpusStats {
        sentences: document.sentences.len(),
        ..CorpusStats::default()
    };

    let mut lemmas: HashSet<&str> = HashSet::new();
    for token in document.sentences.iter().flat_map(|s| &s.tokens) {
        stats.tokens += 1;
        if token.inflection().is_none() {
            stats.tokens_without_feats += 1;
        }
        lemmas.insert(&token.lemma);
    }
    stats.lemmas = lemmas.len();

    stats
}

/// Sum of `wordform_count` over every entry whose lemma equals `lemma`.
///
/// Lemmas are unique keys, so this is always the entry's own count and a
/// keyed lookup gives the same sum as a scan.
pub fn total_frequency(table: &LemmaTable, lemma: &str) -> usize {
    table.get(lemma).map_or(0, |info| info.wordform_count)
}
