//! Mapping tables that translate legacy ticket vocabulary into story terms.
//!
//! The tables are plain data: [`MappingConfig::default`] carries the built-in
//! entries and an operator can extend or override them with a TOML file via
//! [`MappingConfig::load`]. A lookup miss is never an error; it degrades to
//! the documented fallback value.

pub mod config;
pub mod error;
pub mod state;
pub mod story_type;
pub mod users;

pub use config::MappingConfig;
pub use error::{ConfigError, Result};
pub use state::{DEFAULT_ESTIMATE, DEFAULT_STATE, StateTable, StateTarget};
pub use story_type::{DEFAULT_STORY_TYPE, TypeTable};
pub use users::{IdentityUsers, TranslateUser, UserTable};
