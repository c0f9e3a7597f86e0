//! Rotating delimited batch files.
//!
//! Each batch starts with [`BATCH_HEADER`] and holds at most
//! [`BatchOptions::batch_size`] rows. Batch `n` for prefix `out` is written
//! to `out-n.csv`. A record whose rendered description is longer than
//! [`BatchOptions::overflow_limit`] bytes is still written to its batch and
//! is also appended to a single overflow file kept open for the whole run.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use trac_model::{BATCH_HEADER, NormalizedStory};

use crate::error::{OutputError, Result};

/// Rows per batch file.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Description size, in bytes, above which a record is copied to the overflow file.
pub const DEFAULT_OVERFLOW_LIMIT: usize = 5000;

/// File name of the overflow file.
pub const OVERFLOW_FILE_NAME: &str = "trac_long.csv";

/// Options for batch writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub overflow_limit: usize,
    /// Overflow file location; defaults to [`OVERFLOW_FILE_NAME`] beside the batches.
    pub overflow_path: Option<PathBuf>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            overflow_limit: DEFAULT_OVERFLOW_LIMIT,
            overflow_path: None,
        }
    }
}

/// One batch file written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFile {
    pub path: PathBuf,
    pub records: usize,
}

/// A record copied to the overflow file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowRecord {
    pub id: i64,
    /// Size of the rendered description in bytes.
    pub bytes: usize,
    /// Batch the record was also written to.
    pub batch: PathBuf,
}

/// What a finished [`BatchWriter`] produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub batches: Vec<BatchFile>,
    pub overflow: Vec<OverflowRecord>,
    /// Set once the overflow file has been opened.
    pub overflow_path: Option<PathBuf>,
}

impl BatchSummary {
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.batches.iter().map(|batch| batch.records).sum()
    }
}

/// Path of batch `sequence` (1-based) for `prefix`.
#[must_use]
pub fn batch_path(prefix: &Path, sequence: usize) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(format!("-{sequence}.csv"));
    PathBuf::from(name)
}

/// Render the fixed-column line for one story, including the trailing newline.
#[must_use]
pub fn render_line(story: &NormalizedStory) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
        story.id,
        story.story,
        story.labels,
        story.story_type,
        story.estimate,
        story.current_state,
        story.created_at,
        story.accepted_at,
        story.deadline,
        story.requested_by,
        story.owned_by,
        story.description,
        story.notes,
    )
}

struct OpenBatch {
    path: PathBuf,
    writer: BufWriter<File>,
    records: usize,
}

/// Streams stories into rotating batch files.
///
/// Batch files are opened lazily, so a run without records creates no files.
/// Existing batch files are never overwritten.
pub struct BatchWriter {
    prefix: PathBuf,
    options: BatchOptions,
    current: Option<OpenBatch>,
    overflow: Option<BufWriter<File>>,
    summary: BatchSummary,
}

impl BatchWriter {
    pub fn new(prefix: impl Into<PathBuf>, options: BatchOptions) -> Self {
        Self {
            prefix: prefix.into(),
            options,
            current: None,
            overflow: None,
            summary: BatchSummary::default(),
        }
    }

    /// Where oversized records are appended.
    #[must_use]
    pub fn overflow_path(&self) -> PathBuf {
        match &self.options.overflow_path {
            Some(path) => path.clone(),
            None => self
                .prefix
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(OVERFLOW_FILE_NAME),
        }
    }

    pub fn write_story(&mut self, story: &NormalizedStory) -> Result<()> {
        let batch_size = self.options.batch_size.max(1);
        let mut batch = match self.current.take() {
            Some(batch) if batch.records < batch_size => batch,
            full => {
                if let Some(full) = full {
                    close_batch(full)?;
                }
                self.open_next()?
            }
        };

        let line = render_line(story);
        let bytes = story.description.len();
        if bytes > self.options.overflow_limit {
            warn!(
                id = story.id,
                batch = %batch.path.display(),
                bytes,
                limit = self.options.overflow_limit,
                "description exceeds size limit, copying record to overflow file"
            );
            self.write_overflow(&line)?;
            self.summary.overflow.push(OverflowRecord {
                id: story.id,
                bytes,
                batch: batch.path.clone(),
            });
        }

        batch
            .writer
            .write_all(line.as_bytes())
            .map_err(|source| OutputError::Write {
                path: batch.path.clone(),
                source,
            })?;
        batch.records += 1;
        if let Some(entry) = self.summary.batches.last_mut() {
            entry.records = batch.records;
        }
        debug!(id = story.id, batch = %batch.path.display(), "wrote story");
        self.current = Some(batch);
        Ok(())
    }

    /// Flush and close every open file.
    pub fn finish(mut self) -> Result<BatchSummary> {
        if let Some(batch) = self.current.take() {
            close_batch(batch)?;
        }
        if let Some(mut overflow) = self.overflow.take() {
            let path = self.overflow_path();
            overflow
                .flush()
                .map_err(|source| OutputError::Write { path, source })?;
        }
        Ok(self.summary)
    }

    fn open_next(&mut self) -> Result<OpenBatch> {
        let path = batch_path(&self.prefix, self.summary.batches.len() + 1);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| {
                if source.kind() == ErrorKind::AlreadyExists {
                    OutputError::BatchExists { path: path.clone() }
                } else {
                    OutputError::Create {
                        path: path.clone(),
                        source,
                    }
                }
            })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(BATCH_HEADER.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "writing batch");
        self.summary.batches.push(BatchFile {
            path: path.clone(),
            records: 0,
        });
        Ok(OpenBatch {
            path,
            writer,
            records: 0,
        })
    }

    fn write_overflow(&mut self, line: &str) -> Result<()> {
        let path = self.overflow_path();
        if self.overflow.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| OutputError::Create {
                    path: path.clone(),
                    source,
                })?;
            self.overflow = Some(BufWriter::new(file));
            self.summary.overflow_path = Some(path.clone());
        }
        if let Some(writer) = self.overflow.as_mut() {
            writer
                .write_all(line.as_bytes())
                .map_err(|source| OutputError::Write { path, source })?;
        }
        Ok(())
    }
}

fn close_batch(mut batch: OpenBatch) -> Result<()> {
    batch.writer.flush().map_err(|source| OutputError::Write {
        path: batch.path.clone(),
        source,
    })?;
    debug!(path = %batch.path.display(), records = batch.records, "closed batch");
    Ok(())
}

/// Write every story to batches under `prefix` and close all files.
pub fn write_batches<I>(stories: I, prefix: &Path, options: BatchOptions) -> Result<BatchSummary>
where
    I: IntoIterator<Item = NormalizedStory>,
{
    let mut writer = BatchWriter::new(prefix, options);
    for story in stories {
        writer.write_story(&story)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_paths_are_numbered_from_one() {
        assert_eq!(
            batch_path(Path::new("out/tickets"), 1),
            PathBuf::from("out/tickets-1.csv")
        );
        assert_eq!(batch_path(Path::new("tickets"), 12), PathBuf::from("tickets-12.csv"));
    }

    #[test]
    fn overflow_file_sits_beside_batches() {
        let writer = BatchWriter::new("exports/run", BatchOptions::default());
        assert_eq!(writer.overflow_path(), PathBuf::from("exports/trac_long.csv"));

        let writer = BatchWriter::new("run", BatchOptions::default());
        assert_eq!(writer.overflow_path(), PathBuf::from("trac_long.csv"));
    }

    #[test]
    fn blank_story_renders_empty_columns() {
        let line = render_line(&NormalizedStory::default());
        assert_eq!(line, "0,,,,,,,,,,,,\n");
    }
}
