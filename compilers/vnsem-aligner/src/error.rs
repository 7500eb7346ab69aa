use std::path::PathBuf;

use thiserror::Error;
use vnsem_notation::NotationError;

/// Failures while loading lexical resources. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read table {path:?}: {source}")]
    Table {
        path: PathBuf,
        source: csv::Error,
    },
    #[error("{path:?} line {line}: {reason}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    #[error("invalid frame archive: {0}")]
    Archive(String),
    #[error(transparent)]
    Notation(#[from] NotationError),
}
