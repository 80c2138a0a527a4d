//! Per-path classification against both roots.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use verity_core::types::{Classification, RelativePath};

use crate::error::{io_err, CompareError};

const COMPARE_BUF: usize = 64 * 1024;

/// Classifies a single relative file path by consulting both roots.
///
/// Read-only: no file is ever created, modified, or deleted here.
#[derive(Debug, Clone)]
pub struct Comparator {
    first_root: PathBuf,
    second_root: PathBuf,
}

impl Comparator {
    pub fn new(first_root: impl Into<PathBuf>, second_root: impl Into<PathBuf>) -> Self {
        Self {
            first_root: first_root.into(),
            second_root: second_root.into(),
        }
    }

    /// Classify `rel`, in policy order: missing from first, missing from
    /// second, then a full byte-for-byte comparison. Size or mtime equality
    /// is never trusted as proof of identity — an unequal size is only used
    /// to short-circuit straight to [`Classification::ContentDiffers`].
    pub fn classify(&self, rel: &RelativePath) -> Result<Classification, CompareError> {
        let first = rel.resolve_under(&self.first_root);
        let second = rel.resolve_under(&self.second_root);

        if !first.exists() {
            return Ok(Classification::MissingFromFirst(rel.clone()));
        }
        if !second.exists() {
            return Ok(Classification::MissingFromSecond(rel.clone()));
        }
        if contents_match(&first, &second)? {
            Ok(Classification::Identical)
        } else {
            Ok(Classification::ContentDiffers(rel.clone()))
        }
    }
}

/// Byte-for-byte equality of two files, with a size fast path.
///
/// A file that vanishes or turns unreadable between discovery and this read
/// surfaces as [`CompareError::Io`] — never silently reclassified.
fn contents_match(first: &Path, second: &Path) -> Result<bool, CompareError> {
    let first_len = std::fs::metadata(first).map_err(|e| io_err(first, e))?.len();
    let second_len = std::fs::metadata(second)
        .map_err(|e| io_err(second, e))?
        .len();
    if first_len != second_len {
        return Ok(false);
    }

    let mut lhs = BufReader::with_capacity(
        COMPARE_BUF,
        File::open(first).map_err(|e| io_err(first, e))?,
    );
    let mut rhs = BufReader::with_capacity(
        COMPARE_BUF,
        File::open(second).map_err(|e| io_err(second, e))?,
    );

    loop {
        let left = lhs.fill_buf().map_err(|e| io_err(first, e))?;
        let right = rhs.fill_buf().map_err(|e| io_err(second, e))?;
        if left.is_empty() && right.is_empty() {
            return Ok(true);
        }
        let len = left.len().min(right.len());
        if len == 0 {
            // One file ended early: lengths changed since the metadata check.
            return Ok(false);
        }
        if left[..len] != right[..len] {
            return Ok(false);
        }
        lhs.consume(len);
        rhs.consume(len);
    }
}
