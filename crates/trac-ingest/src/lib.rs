//! Legacy tracker ingestion.
//!
//! [`TicketStore`] opens the tracker database read-only and exposes the two
//! queries the migration needs: a lazy, id-ordered walk over every ticket and
//! the comment rows of one ticket.

pub mod error;
pub mod store;

pub use error::{IngestError, Result};
pub use store::{DEFAULT_PAGE_SIZE, TicketCursor, TicketStore};
