//! Error types for mapping configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a mapping file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The mapping file could not be read.
    #[error("failed to read mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping file is not valid TOML or has an unexpected shape.
    #[error("failed to parse mapping file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Inline mapping text could not be parsed.
    #[error("invalid mapping: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_file() {
        let err = ConfigError::Io {
            path: PathBuf::from("/etc/mapping.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read mapping file /etc/mapping.toml: gone"
        );
    }
}
