use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use trac_cli::pipeline::{
    DryRunSubmitter, ensure_fresh_prefix, export_stories, open_store, output_prefix,
    push_stories, stories,
};
use trac_map::MappingConfig;
use trac_model::Requestor;
use trac_output::{BatchOptions, BatchSummary, PayloadBuilder};
use trac_submit::TrackerClient;
use trac_transform::{Quoting, RecordAssembler, TimeFormatter, TimeZoneMode};

use crate::cli::{Cli, ExportArgs, PushArgs, TimeZoneArg};
use crate::summary::apply_table_style;
use crate::types::{ExportResult, PushResult};

/// Options shared by every subcommand.
pub struct Settings {
    pub mapping: MappingConfig,
    pub time: TimeFormatter,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mapping = match &cli.mapping {
            Some(path) => MappingConfig::load(path).context("load mapping file")?,
            None => MappingConfig::default(),
        };
        let zone = match cli.timezone {
            TimeZoneArg::Local => TimeZoneMode::Local,
            TimeZoneArg::Utc => TimeZoneMode::Utc,
        };
        Ok(Self {
            mapping,
            time: TimeFormatter::new(zone),
        })
    }

    fn assembler(&self, quoting: Quoting) -> RecordAssembler {
        RecordAssembler::new(&self.mapping)
            .with_time_formatter(self.time)
            .with_quoting(quoting)
    }
}

pub fn run_mappings(settings: &Settings) -> Result<()> {
    let mut states = Table::new();
    states.set_header(vec!["Status", "Resolution", "State", "Estimate"]);
    apply_table_style(&mut states);
    for (status, resolution, target) in settings.mapping.states.iter() {
        states.add_row(vec![
            status,
            or_dash(resolution),
            target.state.as_str(),
            or_dash(&target.estimate),
        ]);
    }
    println!("{states}");

    let mut types = Table::new();
    types.set_header(vec!["Ticket type", "Story type"]);
    apply_table_style(&mut types);
    for (ticket_type, story_type) in settings.mapping.types.iter() {
        types.add_row(vec![ticket_type, story_type]);
    }
    types.add_row(vec!["(other)", settings.mapping.types.fallback()]);
    println!("{types}");

    if !settings.mapping.users.is_empty() {
        let mut users = Table::new();
        users.set_header(vec!["Legacy user", "Story user"]);
        apply_table_style(&mut users);
        for (legacy, target) in settings.mapping.users.iter() {
            users.add_row(vec![legacy, target]);
        }
        println!("{users}");
    }
    Ok(())
}

pub fn run_export(args: &ExportArgs, settings: &Settings) -> Result<ExportResult> {
    let span = info_span!("export", source = %args.source.display());
    let _guard = span.enter();

    let store = open_store(&args.source)?;
    let prefix = output_prefix(&args.output);
    ensure_fresh_prefix(&prefix)?;

    let tickets = store.count_tickets().context("count tickets")?;
    let mut result = ExportResult {
        source: args.source.clone(),
        prefix: prefix.clone(),
        tickets,
        skipped: args.skip,
        summary: BatchSummary::default(),
    };
    if tickets == 0 {
        info!("ticket table is empty, nothing to export");
        return Ok(result);
    }
    info!(tickets, prefix = %prefix.display(), "exporting tickets");

    let assembler = settings.assembler(Quoting::Quoted);
    let progress = progress_bar(remaining(tickets, args.skip), "Exporting");
    let summary = export_stories(
        stories(&store, &assembler, args.skip),
        &prefix,
        BatchOptions::default(),
        &progress,
    );
    progress.finish_and_clear();
    result.summary = summary?;
    Ok(result)
}

pub fn run_push(args: &PushArgs, settings: &Settings) -> Result<PushResult> {
    let span = info_span!("push", source = %args.source.display(), project_id = args.project_id);
    let _guard = span.enter();

    let store = open_store(&args.source)?;
    let tickets = store.count_tickets().context("count tickets")?;
    let assembler = settings.assembler(Quoting::Plain);
    let builder = PayloadBuilder::new(settings.time);

    let (requestor, outcome) = if args.dry_run {
        info!(tickets, "dry run, building payloads only");
        let progress = progress_bar(remaining(tickets, args.skip), "Building");
        let requestor = Requestor::Unresolved;
        let outcome = push_stories(
            stories(&store, &assembler, args.skip),
            &builder,
            args.project_id,
            &requestor,
            &DryRunSubmitter,
            &progress,
        );
        progress.finish_and_clear();
        (requestor, outcome?)
    } else {
        let client = TrackerClient::new(&args.endpoint, &args.api_token, args.project_id)
            .context("create API client")?;
        let requestor = client.fetch_default_requestor();
        info!(tickets, requestor = %requestor, "submitting stories");
        let progress = progress_bar(remaining(tickets, args.skip), "Submitting");
        let outcome = push_stories(
            stories(&store, &assembler, args.skip),
            &builder,
            args.project_id,
            &requestor,
            &client,
            &progress,
        );
        progress.finish_and_clear();
        (requestor, outcome?)
    };

    Ok(PushResult {
        source: args.source.clone(),
        project_id: args.project_id,
        requestor,
        dry_run: args.dry_run,
        outcome,
    })
}

fn remaining(tickets: u64, skip: usize) -> u64 {
    tickets.saturating_sub(u64::try_from(skip).unwrap_or(u64::MAX))
}

fn progress_bar(total: u64, label: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix} [{bar:40.cyan/blue}] {pos}/{len} tickets ({percent:>3}%)",
    ) {
        bar.set_style(style);
    }
    bar.set_prefix(label.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
