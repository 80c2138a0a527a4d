//! Error types for verity-compare.

use std::path::PathBuf;

use thiserror::Error;

use verity_core::error::PathError;

/// All errors that can arise from a comparison run.
///
/// Every variant is fatal for the run: a partial traversal or a stale read
/// would understate discrepancies, so nothing is retried or skipped.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A supplied root does not exist or is not a directory.
    #[error("root {path} is not an existing directory")]
    RootNotADirectory { path: PathBuf },

    /// A directory listing produced a name that cannot be a path segment.
    #[error("malformed entry under {path}: {source}")]
    Entry {
        path: PathBuf,
        #[source]
        source: PathError,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`CompareError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CompareError {
    CompareError::Io {
        path: path.into(),
        source,
    }
}
