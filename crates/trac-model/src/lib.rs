//! Record types shared by the migration crates.
//!
//! A [`SourceTicket`] and its [`SourceComment`] rows are read from the legacy
//! tracker, translated once into a [`NormalizedStory`], and then consumed by
//! exactly one output path (batch files or an API payload).

pub mod requestor;
pub mod story;
pub mod ticket;

pub use requestor::Requestor;
pub use story::{BATCH_HEADER, NormalizedStory};
pub use ticket::{SourceComment, SourceTicket};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_header_has_fourteen_columns() {
        assert_eq!(BATCH_HEADER.split(',').count(), 14);
        assert!(BATCH_HEADER.starts_with("Id,Story,Labels,"));
        assert!(BATCH_HEADER.ends_with(",Description,Note,Note"));
    }

    #[test]
    fn default_story_is_blank() {
        let story = NormalizedStory::default();
        assert!(story.story.is_empty());
        assert!(story.deadline.is_empty());
        assert!(story.notes_full.is_empty());
    }
}
