//! Integration tests for ticket assembly.

use std::collections::BTreeMap;

use trac_map::{MappingConfig, TranslateUser};
use trac_model::{SourceComment, SourceTicket};
use trac_transform::{Quoting, RecordAssembler, TimeFormatter, TimeZoneMode};

fn assembler(quoting: Quoting) -> RecordAssembler {
    RecordAssembler::new(&MappingConfig::default())
        .with_quoting(quoting)
        .with_time_formatter(TimeFormatter::new(TimeZoneMode::Utc))
}

fn sample_ticket() -> SourceTicket {
    SourceTicket {
        id: 42,
        ticket_type: "defect".to_string(),
        time: 1_262_304_000,
        changetime: 1_264_982_400_000_000,
        component: "parser".to_string(),
        owner: "alice".to_string(),
        reporter: "bob".to_string(),
        version: "1.0".to_string(),
        milestone: "m2".to_string(),
        status: "closed".to_string(),
        resolution: "fixed".to_string(),
        summary: "Crash on \"empty\" input".to_string(),
        description: "It '''always''' fails".to_string(),
        keywords: "crash".to_string(),
        ..SourceTicket::default()
    }
}

fn sample_comments() -> Vec<SourceComment> {
    vec![
        SourceComment::new("first ''look''", 1_262_400_000, "carol"),
        SourceComment::new("fixed in \"r12\"", 1_264_982_400_000_000, "alice"),
    ]
}

#[test]
fn end_to_end_new_enhancement() {
    let ticket = SourceTicket {
        id: 23,
        ticket_type: "enhancement".to_string(),
        status: "new".to_string(),
        summary: "My very own story".to_string(),
        ..SourceTicket::default()
    };

    let story = assembler(Quoting::Plain).assemble(&ticket, Vec::new());

    assert_eq!(story.story_type, "feature");
    assert_eq!(story.current_state, "unscheduled");
    assert_eq!(story.estimate, "");
    assert_eq!(story.story, "My very own story (Legacy Ticket #23)");
    assert_eq!(story.created_at, "");
    assert_eq!(story.labels, "");
    assert_eq!(story.notes, "");
}

#[test]
fn quoted_assembly_for_batch_export() {
    let story = assembler(Quoting::Quoted).assemble(&sample_ticket(), sample_comments());

    assert_eq!(story.id, 42);
    assert_eq!(story.story, "\"Crash on 'empty' input (Legacy Ticket #42)\"");
    assert_eq!(story.labels, "\"crash, parser, 1.0, m2\"");
    assert_eq!(story.story_type, "bug");
    assert_eq!(story.current_state, "accepted");
    assert_eq!(story.estimate, "2");
    assert_eq!(story.created_at, "\"Jan 01, 2010\"");
    assert_eq!(story.accepted_at, "Feb 01, 2010");
    assert_eq!(story.deadline, "");
    assert_eq!(story.requested_by, "bob");
    assert_eq!(story.owned_by, "alice");
    assert_eq!(story.description, "\"It *always* fails\"");
    assert_eq!(story.notes, "\"first _look_\",\"fixed in 'r12'\"");
}

#[test]
fn notes_full_keeps_raw_comments_in_order() {
    let story = assembler(Quoting::Quoted).assemble(&sample_ticket(), sample_comments());

    assert_eq!(story.notes_full, sample_comments());
    assert_eq!(story.notes_full[0].text, "first ''look''");
    assert_eq!(story.notes_full[1].author, "alice");
}

#[test]
fn plain_assembly_for_payloads() {
    let story = assembler(Quoting::Plain).assemble(&sample_ticket(), sample_comments());

    assert_eq!(story.story, "Crash on 'empty' input (Legacy Ticket #42)");
    assert_eq!(story.labels, "crash, parser, 1.0, m2");
    assert_eq!(story.created_at, "Jan 01, 2010");
    assert_eq!(story.notes, "first _look_,fixed in 'r12'");
}

#[test]
fn unknown_status_and_type_degrade() {
    let ticket = SourceTicket {
        id: 5,
        ticket_type: "question".to_string(),
        status: "testing".to_string(),
        resolution: "pending".to_string(),
        ..SourceTicket::default()
    };

    let story = assembler(Quoting::Quoted).assemble(&ticket, Vec::new());

    assert_eq!(story.current_state, "unscheduled");
    assert_eq!(story.estimate, "");
    assert_eq!(story.story_type, "feature");
    assert!(story.story.ends_with("(Legacy Ticket #5)\""));
}

struct Upper;

impl TranslateUser for Upper {
    fn translate(&self, user: &str) -> String {
        user.to_uppercase()
    }
}

#[test]
fn user_hook_is_applied_to_reporter_and_owner() {
    let story = assembler(Quoting::Plain)
        .with_users(Upper)
        .assemble(&sample_ticket(), Vec::new());

    assert_eq!(story.requested_by, "BOB");
    assert_eq!(story.owned_by, "ALICE");
}

#[test]
fn configured_user_table_is_used() {
    let mut mapping = MappingConfig::default();
    let mut users = BTreeMap::new();
    users.insert("bob".to_string(), "Bob Builder".to_string());
    mapping.users = trac_map::UserTable::new(users);

    let story = RecordAssembler::new(&mapping).assemble(&sample_ticket(), Vec::new());

    assert_eq!(story.requested_by, "Bob Builder");
    assert_eq!(story.owned_by, "alice");
}
