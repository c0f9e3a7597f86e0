//! Library side of the `trac-migrate` binary.

pub mod logging;
pub mod pipeline;
