//! Error types for legacy database ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading the legacy database.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The database file does not exist.
    #[error("source database not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// SQLite refused to open the file.
    #[error("failed to open source database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A query against the ticket tables failed.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
