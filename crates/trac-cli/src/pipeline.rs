//! Export and push pipelines.
//!
//! Both pipelines consume the same lazy story stream built by [`stories`]:
//! tickets are read in id order, assembled one at a time, and handed to the
//! active sink. Nothing holds the whole ticket set in memory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use trac_ingest::TicketStore;
use trac_model::{NormalizedStory, Requestor};
use trac_output::{BatchOptions, BatchSummary, BatchWriter, PayloadBuilder, batch_path};
use trac_submit::StorySubmitter;
use trac_transform::RecordAssembler;

/// Batch prefix for an output path: the path with its final extension removed.
#[must_use]
pub fn output_prefix(output: &Path) -> PathBuf {
    output.with_extension("")
}

/// Refuse to run when the first batch of `prefix` is already present.
pub fn ensure_fresh_prefix(prefix: &Path) -> Result<()> {
    let first = batch_path(prefix, 1);
    if first.exists() {
        bail!(
            "output {} already exists, move it away or choose another output name",
            first.display()
        );
    }
    Ok(())
}

pub fn open_store(source: &Path) -> Result<TicketStore> {
    TicketStore::open(source).with_context(|| format!("open source {}", source.display()))
}

/// Lazy stream of assembled stories, skipping the first `skip` tickets.
pub fn stories<'a>(
    store: &'a TicketStore,
    assembler: &'a RecordAssembler,
    skip: usize,
) -> impl Iterator<Item = Result<NormalizedStory>> + 'a {
    store.tickets().skip(skip).map(move |ticket| {
        let ticket = ticket.context("read ticket")?;
        let comments = store
            .comments(ticket.id)
            .with_context(|| format!("read comments of ticket {}", ticket.id))?;
        Ok(assembler.assemble(&ticket, comments))
    })
}

/// Write every story into rotating batches under `prefix`.
pub fn export_stories<I>(
    stories: I,
    prefix: &Path,
    options: BatchOptions,
    progress: &ProgressBar,
) -> Result<BatchSummary>
where
    I: IntoIterator<Item = Result<NormalizedStory>>,
{
    let mut writer = BatchWriter::new(prefix, options);
    for story in stories {
        let story = story?;
        writer
            .write_story(&story)
            .with_context(|| format!("write ticket {}", story.id))?;
        progress.inc(1);
    }
    let summary = writer.finish().context("close batch files")?;
    info!(
        batches = summary.batches.len(),
        records = summary.total_records(),
        oversized = summary.overflow.len(),
        "export finished"
    );
    Ok(summary)
}

/// A story the service did not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSubmission {
    pub id: i64,
    pub error: String,
}

/// Tally of a push run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOutcome {
    pub submitted: usize,
    pub failed: Vec<FailedSubmission>,
}

impl PushOutcome {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.submitted + self.failed.len()
    }
}

/// Build and submit one payload per story, in order.
///
/// Rejected submissions are logged and recorded; the run moves on to the
/// next story. Read failures end the run.
pub fn push_stories<I, S>(
    stories: I,
    builder: &PayloadBuilder,
    project_id: u64,
    requestor: &Requestor,
    submitter: &S,
    progress: &ProgressBar,
) -> Result<PushOutcome>
where
    I: IntoIterator<Item = Result<NormalizedStory>>,
    S: StorySubmitter + ?Sized,
{
    let mut outcome = PushOutcome::default();
    for story in stories {
        let story = story?;
        let payload = builder
            .build(&story, project_id, requestor)
            .with_context(|| format!("build payload for ticket {}", story.id))?;
        match submitter.submit_story(&payload) {
            Ok(()) => {
                debug!(id = story.id, "story submitted");
                outcome.submitted += 1;
            }
            Err(error) => {
                warn!(id = story.id, %error, "story submission failed");
                outcome.failed.push(FailedSubmission {
                    id: story.id,
                    error: error.to_string(),
                });
            }
        }
        progress.inc(1);
    }
    info!(
        submitted = outcome.submitted,
        failed = outcome.failed.len(),
        "push finished"
    );
    Ok(outcome)
}

/// Submitter that only logs payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSubmitter;

impl StorySubmitter for DryRunSubmitter {
    fn submit_story(&self, payload: &str) -> trac_submit::Result<()> {
        debug!(payload, "dry run, payload not sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_drops_only_the_last_extension() {
        assert_eq!(output_prefix(Path::new("out.csv")), PathBuf::from("out"));
        assert_eq!(output_prefix(Path::new("out")), PathBuf::from("out"));
        assert_eq!(
            output_prefix(Path::new("exports/run.2024.csv")),
            PathBuf::from("exports/run.2024")
        );
    }

    #[test]
    fn attempted_counts_both_outcomes() {
        let outcome = PushOutcome {
            submitted: 3,
            failed: vec![FailedSubmission {
                id: 9,
                error: "boom".to_string(),
            }],
        };
        assert_eq!(outcome.attempted(), 4);
    }
}
