//! Errors raised while loading `autoplace.toml`.

use std::path::{Path, PathBuf};

/// Why a configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The TOML is malformed or has unknown keys or bad length strings.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Prefixes parse and validation messages with the file they came from.
    pub(crate) fn in_file(self, path: &Path) -> Self {
        match self {
            ConfigError::ParseError(msg) => {
                ConfigError::ParseError(format!("{}: {msg}", path.display()))
            }
            ConfigError::ValidationError(msg) => {
                ConfigError::ValidationError(format!("{}: {msg}", path.display()))
            }
            read @ ConfigError::Read { .. } => read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_file() {
        let err = ConfigError::Read {
            path: PathBuf::from("boards/autoplace.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read boards/autoplace.toml: not found");
    }

    #[test]
    fn in_file_prefixes_messages() {
        let err = ConfigError::ValidationError("grid.layers must be 1 or 2".to_string())
            .in_file(Path::new("autoplace.toml"));
        assert_eq!(
            err.to_string(),
            "invalid configuration: autoplace.toml: grid.layers must be 1 or 2"
        );
        let err = ConfigError::ParseError("expected '='".to_string()).in_file(Path::new("a.toml"));
        assert_eq!(err.to_string(), "failed to parse configuration: a.toml: expected '='");
    }
}
