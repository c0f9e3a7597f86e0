//! Error types for output generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing batches or building payloads.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A batch file from an earlier run is in the way.
    #[error("batch file already exists: {path}")]
    BatchExists { path: PathBuf },

    /// An output file could not be created or opened.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing an open output file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML payload could not be serialized.
    #[error("failed to build payload: {0}")]
    Xml(String),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
