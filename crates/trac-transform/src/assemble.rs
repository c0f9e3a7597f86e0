//! Assembly of one story from a ticket and its comments.

use tracing::trace;

use trac_map::{MappingConfig, StateTable, TranslateUser, TypeTable};
use trac_model::{NormalizedStory, SourceComment, SourceTicket};

use crate::sanitize::{Quoting, sanitize};
use crate::tags::merge_tags;
use crate::time::TimeFormatter;

/// Story title with a back-reference to the legacy ticket.
#[must_use]
pub fn format_title(ticket: &SourceTicket) -> String {
    format!("{} (Legacy Ticket #{})", ticket.summary, ticket.id)
}

/// Builds a [`NormalizedStory`] per ticket from injected mapping tables.
pub struct RecordAssembler {
    states: StateTable,
    types: TypeTable,
    users: Box<dyn TranslateUser>,
    time: TimeFormatter,
    quoting: Quoting,
}

impl RecordAssembler {
    /// Assembler using the tables of `mapping`, quoted fields and local dates.
    #[must_use]
    pub fn new(mapping: &MappingConfig) -> Self {
        Self {
            states: mapping.states.clone(),
            types: mapping.types.clone(),
            users: Box::new(mapping.users.clone()),
            time: TimeFormatter::default(),
            quoting: Quoting::Quoted,
        }
    }

    #[must_use]
    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    #[must_use]
    pub fn with_time_formatter(mut self, time: TimeFormatter) -> Self {
        self.time = time;
        self
    }

    /// Replace the user translation hook.
    #[must_use]
    pub fn with_users(mut self, users: impl TranslateUser + 'static) -> Self {
        self.users = Box::new(users);
        self
    }

    #[must_use]
    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// Translate one ticket. Comments keep their fetch order.
    #[must_use]
    pub fn assemble(&self, ticket: &SourceTicket, comments: Vec<SourceComment>) -> NormalizedStory {
        let quoting = self.quoting;
        let (state, estimate) = self.states.map(&ticket.status, &ticket.resolution);
        let notes = comments
            .iter()
            .map(|comment| sanitize(&comment.text, quoting))
            .collect::<Vec<_>>()
            .join(",");
        trace!(
            ticket_id = ticket.id,
            status = %ticket.status,
            resolution = %ticket.resolution,
            state,
            comments = comments.len(),
            "assembled story"
        );
        NormalizedStory {
            id: ticket.id,
            story: sanitize(&format_title(ticket), quoting),
            labels: merge_tags(ticket, quoting),
            story_type: self.types.map(&ticket.ticket_type).to_string(),
            estimate: estimate.to_string(),
            current_state: state.to_string(),
            created_at: self.time.format(ticket.time, quoting),
            // Raw date column, never quoted.
            accepted_at: self.time.format(ticket.changetime, Quoting::Plain),
            deadline: String::new(),
            requested_by: self.users.translate(&ticket.reporter),
            owned_by: self.users.translate(&ticket.owner),
            description: sanitize(&ticket.description, quoting),
            notes,
            notes_full: comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_with_empty_summary_keeps_suffix() {
        let ticket = SourceTicket {
            id: 7,
            ..SourceTicket::default()
        };
        assert_eq!(format_title(&ticket), " (Legacy Ticket #7)");
    }

    #[test]
    fn title_reference() {
        let ticket = SourceTicket {
            id: 23,
            summary: "My very own story".to_string(),
            ..SourceTicket::default()
        };
        assert_eq!(format_title(&ticket), "My very own story (Legacy Ticket #23)");
    }
}
