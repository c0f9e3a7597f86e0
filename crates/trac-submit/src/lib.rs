//! Submission of stories to the tracking service.
//!
//! [`TrackerClient`] performs the two calls a push run needs: resolving a
//! default requestor from the project roster and posting one XML story
//! document at a time. Pipelines depend on the [`StorySubmitter`] trait so
//! they can be driven without network access.

pub mod client;
pub mod error;
pub mod membership;

pub use client::{DEFAULT_ENDPOINT, StorySubmitter, TrackerClient};
pub use error::{Result, SubmitError};
pub use membership::first_member_name;
