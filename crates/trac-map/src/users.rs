//! Translation of legacy user names into target tracker identities.

use std::collections::BTreeMap;

/// Hook for mapping a legacy user name to a target identity.
pub trait TranslateUser {
    fn translate(&self, user: &str) -> String;
}

/// Returns every user name unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityUsers;

impl TranslateUser for IdentityUsers {
    fn translate(&self, user: &str) -> String {
        user.to_string()
    }
}

/// Table-driven translation; names without an entry pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTable {
    entries: BTreeMap<String, String>,
}

impl UserTable {
    #[must_use]
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl TranslateUser for UserTable {
    fn translate(&self, user: &str) -> String {
        self.entries
            .get(user)
            .cloned()
            .unwrap_or_else(|| user.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        assert_eq!(IdentityUsers.translate("jdoe"), "jdoe");
        assert_eq!(IdentityUsers.translate(""), "");
    }

    #[test]
    fn table_falls_back_to_identity() {
        let mut entries = BTreeMap::new();
        entries.insert("jdoe".to_string(), "Jane Doe".to_string());
        let table = UserTable::new(entries);
        assert_eq!(table.translate("jdoe"), "Jane Doe");
        assert_eq!(table.translate("rroe"), "rroe");
    }
}
