//! Error types for verity-core.

use std::path::PathBuf;

use thiserror::Error;

/// A directory listing produced a name that cannot be a path segment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Empty string offered as a segment.
    #[error("empty path segment")]
    EmptySegment,

    /// `.`, `..`, or a name containing a path separator.
    #[error("'{0}' is not a plain directory-entry name")]
    MalformedSegment(String),
}

/// All errors that can arise from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.verity/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// No config file at the expected path.
    #[error("no saved configuration at {path}")]
    ConfigNotFound { path: PathBuf },
}
