//! Ticket-to-story translation.
//!
//! The leaves ([`sanitize`], [`TimeFormatter`], [`merge_tags`]) are pure
//! string functions; [`RecordAssembler`] combines them with the mapping
//! tables to build one [`NormalizedStory`](trac_model::NormalizedStory) per
//! ticket.
//!
//! Every text-producing function takes a [`Quoting`] policy. Delimited
//! exports quote most fields; API payloads use plain text throughout.

pub mod assemble;
pub mod sanitize;
pub mod tags;
pub mod time;

pub use assemble::{RecordAssembler, format_title};
pub use sanitize::{Quoting, sanitize};
pub use tags::{LABEL_SEPARATOR, merge_tags};
pub use time::{DISPLAY_FORMAT, MICROSECOND_THRESHOLD, TimeFormatter, TimeZoneMode};
