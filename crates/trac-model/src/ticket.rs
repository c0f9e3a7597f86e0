/// One row of the legacy `ticket` table.
///
/// Text columns that are NULL in the source are read as empty strings and
/// NULL timestamps as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTicket {
    pub id: i64,
    pub ticket_type: String,
    /// Creation time, seconds or microseconds since the epoch.
    pub time: i64,
    /// Last change time, seconds or microseconds since the epoch.
    pub changetime: i64,
    pub component: String,
    pub severity: String,
    pub priority: String,
    pub owner: String,
    pub reporter: String,
    pub cc: String,
    pub version: String,
    pub milestone: String,
    pub status: String,
    pub resolution: String,
    pub summary: String,
    pub description: String,
    pub keywords: String,
}

/// A comment edit from the legacy change log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceComment {
    pub text: String,
    pub time: i64,
    pub author: String,
}

impl SourceComment {
    pub fn new(text: impl Into<String>, time: i64, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            time,
            author: author.into(),
        }
    }
}
