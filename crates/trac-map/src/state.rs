//! Status/resolution pair to story state and point estimate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// State used for any status/resolution pair missing from the table.
pub const DEFAULT_STATE: &str = "unscheduled";

/// Estimate used for any status/resolution pair missing from the table.
pub const DEFAULT_ESTIMATE: &str = "";

/// Target state and estimate for one status/resolution pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTarget {
    pub state: String,
    #[serde(default)]
    pub estimate: String,
}

impl StateTarget {
    pub fn new(state: impl Into<String>, estimate: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            estimate: estimate.into(),
        }
    }
}

/// Two-level lookup table: status first, then resolution.
///
/// Most open statuses only define the empty resolution. The empty string is
/// a literal key, not a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTable {
    entries: BTreeMap<String, BTreeMap<String, StateTarget>>,
}

impl StateTable {
    /// Table with the built-in status/resolution combinations.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.insert("new", "", StateTarget::new("unscheduled", ""));
        table.insert("assigned", "", StateTarget::new("started", "2"));
        table.insert("closed", "fixed", StateTarget::new("accepted", "2"));
        table.insert("closed", "worksforme", StateTarget::new("accepted", "1"));
        table.insert("closed", "invalid", StateTarget::new("accepted", "0"));
        table.insert("closed", "wontfix", StateTarget::new("accepted", "0"));
        table.insert("closed", "duplicate", StateTarget::new("accepted", "0"));
        table.insert("reopened", "", StateTarget::new("rejected", "2"));
        table
    }

    pub fn insert(
        &mut self,
        status: impl Into<String>,
        resolution: impl Into<String>,
        target: StateTarget,
    ) {
        self.entries
            .entry(status.into())
            .or_default()
            .insert(resolution.into(), target);
    }

    /// Overlay another set of entries; entries from `other` win.
    pub fn extend(&mut self, other: BTreeMap<String, BTreeMap<String, StateTarget>>) {
        for (status, resolutions) in other {
            self.entries.entry(status).or_default().extend(resolutions);
        }
    }

    /// Map a status/resolution pair to `(state, estimate)`.
    #[must_use]
    pub fn map(&self, status: &str, resolution: &str) -> (&str, &str) {
        self.entries
            .get(status)
            .and_then(|resolutions| resolutions.get(resolution))
            .map_or((DEFAULT_STATE, DEFAULT_ESTIMATE), |target| {
                (target.state.as_str(), target.estimate.as_str())
            })
    }

    /// Iterate over `(status, resolution, target)` in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &StateTarget)> {
        self.entries.iter().flat_map(|(status, resolutions)| {
            resolutions
                .iter()
                .map(move |(resolution, target)| (status.as_str(), resolution.as_str(), target))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
