//! Error types for flowsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure while reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },
}

/// Errors raised while building a [`crate::NodeMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeMapError {
    /// Two code nodes in one flow share a name, so a changed file cannot be
    /// matched unambiguously.
    #[error("duplicate code node name '{name}' (node ids {first} and {second})")]
    DuplicateNodeName {
        name: String,
        first: String,
        second: String,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
