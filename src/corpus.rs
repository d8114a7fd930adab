//! Reading annotated corpora from disk.

use crate::models::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading an input corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse the whole document at `path`.
///
/// Missing `sentences`, `tokens`, `lemma` or `pos_finegrained` keys are
/// reported as [`CorpusError::Parse`].
pub fn load_document(path: &Path) -> Result<Document, CorpusError> {
    let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    parse_document(&content).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a document from an in-memory JSON string.
pub fn parse_document(content: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(content)
}
