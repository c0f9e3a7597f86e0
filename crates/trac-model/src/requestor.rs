use std::fmt;

/// Outcome of the best-effort default requestor lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Requestor {
    /// A member of the target project that stories can be attributed to.
    Resolved(String),
    /// The lookup failed or the roster was empty.
    #[default]
    Unresolved,
}

impl Requestor {
    /// Returns the resolved identifier, if any.
    #[must_use]
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            Self::Resolved(name) => Some(name.as_str()),
            Self::Unresolved => None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<String>> for Requestor {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.trim().is_empty() => Self::Resolved(name),
            _ => Self::Unresolved,
        }
    }
}

impl fmt::Display for Requestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(name) => write!(f, "{name}"),
            Self::Unresolved => write!(f, "(unresolved)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_stay_unresolved() {
        assert_eq!(Requestor::from(None), Requestor::Unresolved);
        assert_eq!(Requestor::from(Some("  ".to_string())), Requestor::Unresolved);
        assert_eq!(
            Requestor::from(Some("Jane Doe".to_string())).as_resolved(),
            Some("Jane Doe")
        );
    }
}
