//! Ticket type to story type.

use std::collections::BTreeMap;

/// Story type used when a ticket type has no entry.
pub const DEFAULT_STORY_TYPE: &str = "feature";

/// Exact-match lookup from ticket type to story type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    entries: BTreeMap<String, String>,
    fallback: String,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            fallback: DEFAULT_STORY_TYPE.to_string(),
        }
    }
}

impl TypeTable {
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.insert("defect", "bug");
        table.insert("discussion", "feature");
        table.insert("enhancement", "feature");
        table.insert("task", "feature");
        table
    }

    pub fn insert(&mut self, ticket_type: impl Into<String>, story_type: impl Into<String>) {
        self.entries.insert(ticket_type.into(), story_type.into());
    }

    pub fn extend(&mut self, other: BTreeMap<String, String>) {
        self.entries.extend(other);
    }

    pub fn set_fallback(&mut self, fallback: impl Into<String>) {
        self.fallback = fallback.into();
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    #[must_use]
    pub fn map(&self, ticket_type: &str) -> &str {
        self.entries
            .get(ticket_type)
            .map_or(self.fallback.as_str(), String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
