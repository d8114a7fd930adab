//! Analysis modules.
//!
//! Aggregation of token annotations into per-lemma statistics.

pub mod aggregator;

pub use aggregator::*;
