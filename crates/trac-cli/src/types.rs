use std::path::PathBuf;

use trac_model::Requestor;
use trac_output::BatchSummary;

use trac_cli::pipeline::PushOutcome;

#[derive(Debug)]
pub struct ExportResult {
    pub source: PathBuf,
    pub prefix: PathBuf,
    pub tickets: u64,
    pub skipped: usize,
    pub summary: BatchSummary,
}

#[derive(Debug)]
pub struct PushResult {
    pub source: PathBuf,
    pub project_id: u64,
    pub requestor: Requestor,
    pub dry_run: bool,
    pub outcome: PushOutcome,
}
