//! Integration tests for the export and push pipelines.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use indicatif::ProgressBar;
use rusqlite::{Connection, params};
use tempfile::TempDir;

use trac_cli::pipeline::{
    DryRunSubmitter, ensure_fresh_prefix, export_stories, open_store, output_prefix,
    push_stories, stories,
};
use trac_map::MappingConfig;
use trac_model::Requestor;
use trac_output::{BatchOptions, PayloadBuilder, batch_path};
use trac_submit::{StorySubmitter, SubmitError};
use trac_transform::{Quoting, RecordAssembler, TimeFormatter, TimeZoneMode};

const SCHEMA: &str = "
CREATE TABLE ticket (
    id integer PRIMARY KEY, type text, time integer, changetime integer,
    component text, severity text, priority text, owner text, reporter text,
    cc text, version text, milestone text, status text, resolution text,
    summary text, description text, keywords text
);
CREATE TABLE ticket_change (
    ticket integer, time integer, author text, field text, oldvalue text, newvalue text
);
";

const UTC: TimeFormatter = TimeFormatter::new(TimeZoneMode::Utc);

fn seed(path: &Path, tickets: i64) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    for id in 1..=tickets {
        conn.execute(
            "INSERT INTO ticket (id, type, time, changetime, component, owner, reporter, \
             version, milestone, status, resolution, summary, description, keywords) \
             VALUES (?1, 'defect', 1262304000, 1265000000, 'core', 'alice', 'bob', \
             '', '', 'closed', 'fixed', ?2, ?3, '')",
            params![id, format!("Ticket {id}"), format!("'''Broken''' #{id}")],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO ticket_change (ticket, time, author, field, oldvalue, newvalue) \
         VALUES (1, 1262390400, 'carol', 'comment', '', 'seen it')",
        [],
    )
    .unwrap();
}

fn assembler(quoting: Quoting) -> RecordAssembler {
    RecordAssembler::new(&MappingConfig::default())
        .with_time_formatter(UTC)
        .with_quoting(quoting)
}

#[test]
fn export_writes_quoted_batches() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("trac.db");
    seed(&source, 120);
    let store = open_store(&source).unwrap();
    let assembler = assembler(Quoting::Quoted);
    let prefix = output_prefix(&dir.path().join("stories.csv"));

    ensure_fresh_prefix(&prefix).unwrap();
    let summary = export_stories(
        stories(&store, &assembler, 0),
        &prefix,
        BatchOptions::default(),
        &ProgressBar::hidden(),
    )
    .unwrap();

    assert_eq!(summary.total_records(), 120);
    assert_eq!(summary.batches.len(), 2);
    let first = fs::read_to_string(batch_path(&prefix, 1)).unwrap();
    let mut lines = first.lines();
    assert!(lines.next().unwrap().starts_with("Id,Story,Labels"));
    assert_eq!(
        lines.next().unwrap(),
        "1,\"Ticket 1 (Legacy Ticket #1)\",\"core\",bug,2,accepted,\
         \"Jan 01, 2010\",Feb 01, 2010,,bob,alice,\"*Broken* #1\",\"seen it\""
    );
    assert!(ensure_fresh_prefix(&prefix).is_err());
}

#[test]
fn skip_drops_leading_tickets() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("trac.db");
    seed(&source, 5);
    let store = open_store(&source).unwrap();
    let assembler = assembler(Quoting::Quoted);

    let ids: Vec<i64> = stories(&store, &assembler, 3)
        .map(|story| story.unwrap().id)
        .collect();

    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn missing_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("absent.db");

    assert!(open_store(&source).is_err());
    assert!(!source.exists());
}

struct Recorder {
    payloads: RefCell<Vec<String>>,
    reject: &'static str,
}

impl StorySubmitter for Recorder {
    fn submit_story(&self, payload: &str) -> trac_submit::Result<()> {
        self.payloads.borrow_mut().push(payload.to_string());
        if payload.contains(self.reject) {
            return Err(SubmitError::Rejected {
                status: 422,
                body: "invalid story".to_string(),
            });
        }
        Ok(())
    }
}

#[test]
fn push_continues_after_rejection() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("trac.db");
    seed(&source, 3);
    let store = open_store(&source).unwrap();
    let assembler = assembler(Quoting::Plain);
    let recorder = Recorder {
        payloads: RefCell::new(Vec::new()),
        reject: "<name>Ticket 2 (Legacy Ticket #2)</name>",
    };

    let outcome = push_stories(
        stories(&store, &assembler, 0),
        &PayloadBuilder::new(UTC),
        77,
        &Requestor::Resolved("Jane Doe".to_string()),
        &recorder,
        &ProgressBar::hidden(),
    )
    .unwrap();

    assert_eq!(outcome.submitted, 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, 2);
    assert!(outcome.failed[0].error.contains("422"));

    let payloads = recorder.payloads.borrow();
    assert_eq!(payloads.len(), 3);
    let first = &payloads[0];
    assert!(first.contains(r#"<project_id type="integer">77</project_id>"#));
    assert!(first.contains("<requested_by>Jane Doe</requested_by>"));
    assert!(first.contains("<description>*Broken* #1</description>"));
    assert!(first.contains("<text>seen it</text>"));
    assert!(first.contains(r#"<noted_at type="datetime">Jan 02, 2010</noted_at>"#));
    assert!(!first.contains("bob"));
}

#[test]
fn dry_run_accepts_everything() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("trac.db");
    seed(&source, 4);
    let store = open_store(&source).unwrap();
    let assembler = assembler(Quoting::Plain);

    let outcome = push_stories(
        stories(&store, &assembler, 0),
        &PayloadBuilder::new(UTC),
        1,
        &Requestor::Unresolved,
        &DryRunSubmitter,
        &ProgressBar::hidden(),
    )
    .unwrap();

    assert_eq!(outcome.submitted, 4);
    assert!(outcome.failed.is_empty());
}
