//! Classification fields merged into a label list.

use trac_model::SourceTicket;

use crate::sanitize::{Quoting, sanitize};

/// Separator between labels.
pub const LABEL_SEPARATOR: &str = ", ";

/// Join keywords, component, version and milestone, in that order,
/// skipping empty fields.
#[must_use]
pub fn merge_tags(ticket: &SourceTicket, quoting: Quoting) -> String {
    let labels = [
        ticket.keywords.as_str(),
        ticket.component.as_str(),
        ticket.version.as_str(),
        ticket.milestone.as_str(),
    ]
    .into_iter()
    .filter(|field| !field.is_empty())
    .collect::<Vec<_>>()
    .join(LABEL_SEPARATOR);
    sanitize(&labels, quoting)
}
