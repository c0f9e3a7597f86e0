//! Serialization of normalized stories.
//!
//! - [`BatchWriter`]: delimited text files of at most 100 rows each, plus an
//!   overflow file collecting records with oversized descriptions.
//! - [`PayloadBuilder`]: one XML document per story for API submission.

pub mod batch;
pub mod error;
pub mod payload;

pub use batch::{
    BatchFile, BatchOptions, BatchSummary, BatchWriter, DEFAULT_BATCH_SIZE,
    DEFAULT_OVERFLOW_LIMIT, OVERFLOW_FILE_NAME, OverflowRecord, batch_path, render_line,
    write_batches,
};
pub use error::{OutputError, Result};
pub use payload::PayloadBuilder;
