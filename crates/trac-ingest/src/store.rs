//! Ticket and comment queries.

use std::collections::VecDeque;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row, params};
use tracing::debug;

use trac_model::{SourceComment, SourceTicket};

use crate::error::{IngestError, Result};

/// Tickets fetched per round trip by [`TicketCursor`].
pub const DEFAULT_PAGE_SIZE: usize = 100;

const COUNT_QUERY: &str = "SELECT count(*) FROM ticket";

const TICKET_PAGE_QUERY: &str = "SELECT id, type, time, changetime, component, severity, \
     priority, owner, reporter, cc, version, milestone, status, resolution, summary, \
     description, keywords FROM ticket WHERE id > ?1 ORDER BY id LIMIT ?2";

const COMMENT_QUERY: &str = "SELECT newvalue, time, author FROM ticket_change \
     WHERE field = 'comment' AND ticket = ?1 AND newvalue != ''";

/// Read-only handle on a legacy tracker database.
pub struct TicketStore {
    conn: Connection,
}

impl TicketStore {
    /// Open an existing database file without write access.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(IngestError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened source database");
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn count_tickets(&self) -> Result<u64> {
        let count: i64 = self.conn.query_row(COUNT_QUERY, [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Lazily walk every ticket in id order.
    #[must_use]
    pub fn tickets(&self) -> TicketCursor<'_> {
        self.tickets_paged(DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn tickets_paged(&self, page_size: usize) -> TicketCursor<'_> {
        TicketCursor {
            conn: &self.conn,
            after: i64::MIN,
            page_size: page_size.max(1),
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Non-empty comment edits for one ticket, in the table's natural order.
    pub fn comments(&self, ticket_id: i64) -> Result<Vec<SourceComment>> {
        let mut stmt = self.conn.prepare_cached(COMMENT_QUERY)?;
        let rows = stmt.query_map(params![ticket_id], |row| {
            Ok(SourceComment {
                text: text_column(row, 0)?,
                time: time_column(row, 1)?,
                author: text_column(row, 2)?,
            })
        })?;
        let mut comments = Vec::new();
        for row in rows {
            comments.push(row?);
        }
        Ok(comments)
    }
}

/// Keyset-paginated iterator over the ticket table.
///
/// Holds at most one page in memory. After an error the cursor is exhausted.
pub struct TicketCursor<'conn> {
    conn: &'conn Connection,
    after: i64,
    page_size: usize,
    buffer: VecDeque<SourceTicket>,
    exhausted: bool,
}

impl TicketCursor<'_> {
    fn fill(&mut self) -> Result<()> {
        let conn = self.conn;
        let limit = i64::try_from(self.page_size).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare_cached(TICKET_PAGE_QUERY)?;
        let rows = stmt.query_map(params![self.after, limit], ticket_from_row)?;
        for row in rows {
            self.buffer.push_back(row?);
        }
        if self.buffer.len() < self.page_size {
            self.exhausted = true;
        }
        if let Some(last) = self.buffer.back() {
            self.after = last.id;
        }
        debug!(fetched = self.buffer.len(), after = self.after, "fetched ticket page");
        Ok(())
    }
}

impl Iterator for TicketCursor<'_> {
    type Item = Result<SourceTicket>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            if let Err(err) = self.fill() {
                self.exhausted = true;
                self.buffer.clear();
                return Some(Err(err));
            }
        }
        self.buffer.pop_front().map(Ok)
    }
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<SourceTicket> {
    Ok(SourceTicket {
        id: row.get(0)?,
        ticket_type: text_column(row, 1)?,
        time: time_column(row, 2)?,
        changetime: time_column(row, 3)?,
        component: text_column(row, 4)?,
        severity: text_column(row, 5)?,
        priority: text_column(row, 6)?,
        owner: text_column(row, 7)?,
        reporter: text_column(row, 8)?,
        cc: text_column(row, 9)?,
        version: text_column(row, 10)?,
        milestone: text_column(row, 11)?,
        status: text_column(row, 12)?,
        resolution: text_column(row, 13)?,
        summary: text_column(row, 14)?,
        description: text_column(row, 15)?,
        keywords: text_column(row, 16)?,
    })
}

fn text_column(row: &Row<'_>, index: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(index)?.unwrap_or_default())
}

fn time_column(row: &Row<'_>, index: usize) -> rusqlite::Result<i64> {
    Ok(row.get::<_, Option<i64>>(index)?.unwrap_or_default())
}
