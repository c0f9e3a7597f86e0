//! Loading of the operator-editable mapping file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::state::{StateTable, StateTarget};
use crate::story_type::TypeTable;
use crate::users::UserTable;

/// On-disk shape of a mapping file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingFile {
    #[serde(default)]
    states: BTreeMap<String, BTreeMap<String, StateTarget>>,
    #[serde(default)]
    types: BTreeMap<String, String>,
    #[serde(default)]
    fallback_type: Option<String>,
    #[serde(default)]
    users: BTreeMap<String, String>,
}

/// The complete set of lookup tables used to translate tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    pub states: StateTable,
    pub types: TypeTable,
    pub users: UserTable,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            states: StateTable::builtin(),
            types: TypeTable::builtin(),
            users: UserTable::default(),
        }
    }
}

impl MappingConfig {
    /// Load a mapping file and overlay it on the built-in tables.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: MappingFile = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded mapping file");
        Ok(Self::default().merged(file))
    }

    /// Parse mapping text and overlay it on the built-in tables.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: MappingFile = toml::from_str(contents)?;
        Ok(Self::default().merged(file))
    }

    fn merged(mut self, file: MappingFile) -> Self {
        self.states.extend(file.states);
        self.types.extend(file.types);
        if let Some(fallback) = file.fallback_type {
            self.types.set_fallback(fallback);
        }
        if !file.users.is_empty() {
            self.users = UserTable::new(file.users);
        }
        self
    }
}
