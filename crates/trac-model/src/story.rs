use crate::ticket::SourceComment;

/// Header row written at the top of every batch file.
pub const BATCH_HEADER: &str = "Id,Story,Labels,Story Type,Estimate,Current State,Created at,\
                                Accepted at,Deadline,Requested By,Owned By,Description,Note,Note";

/// A ticket translated into the target tracker's story vocabulary.
///
/// Text fields hold their final rendered form: when the story was assembled
/// for a delimited export, quoted fields already carry their surrounding
/// double quotes. `notes_full` keeps the raw comment rows untouched for
/// formats that need typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedStory {
    pub id: i64,
    /// Story title.
    pub story: String,
    pub labels: String,
    pub story_type: String,
    pub estimate: String,
    pub current_state: String,
    pub created_at: String,
    pub accepted_at: String,
    /// Always empty; the legacy schema has no equivalent.
    pub deadline: String,
    pub requested_by: String,
    pub owned_by: String,
    pub description: String,
    /// Sanitized comment texts joined by commas.
    pub notes: String,
    pub notes_full: Vec<SourceComment>,
}
