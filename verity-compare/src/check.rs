//! The comparison pipeline: walk both trees, classify the union, ledger it.
//!
//! This is the canonical entrypoint for the CLI and for library consumers.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use verity_core::types::RelativePath;

use crate::classify::Comparator;
use crate::error::CompareError;
use crate::ledger::DiscrepancyLedger;
use crate::walk;

/// Outcome of comparing two trees.
#[derive(Debug)]
pub struct CheckOutcome {
    pub first_root: PathBuf,
    pub second_root: PathBuf,
    pub ledger: DiscrepancyLedger,
}

impl CheckOutcome {
    pub fn status_code(&self) -> u32 {
        self.ledger.status_code()
    }

    pub fn is_clean(&self) -> bool {
        self.ledger.is_clean()
    }
}

/// Compare the trees under `first_root` and `second_root`.
///
/// Both roots are validated up front, so a bad second root surfaces before
/// any traversal begins. Each tree is then walked exactly once; the union of
/// their relative file paths (deduplicated, sorted segment-wise by the
/// `BTreeSet`) is classified path by path into a fresh ledger. Any traversal
/// or read failure aborts the run with no partial result.
pub fn run(first_root: &Path, second_root: &Path) -> Result<CheckOutcome, CompareError> {
    walk::ensure_directory(first_root)?;
    walk::ensure_directory(second_root)?;

    let mut paths = walk::file_paths(first_root)?;
    paths.extend(walk::file_paths(second_root)?);
    classify_union(first_root, second_root, &paths)
}

fn classify_union(
    first_root: &Path,
    second_root: &Path,
    paths: &BTreeSet<RelativePath>,
) -> Result<CheckOutcome, CompareError> {
    let comparator = Comparator::new(first_root, second_root);
    let mut ledger = DiscrepancyLedger::new();
    for rel in paths {
        ledger.record(comparator.classify(rel)?);
    }

    tracing::info!(
        "checked {} file path(s): status code {}",
        paths.len(),
        ledger.status_code()
    );
    Ok(CheckOutcome {
        first_root: first_root.to_path_buf(),
        second_root: second_root.to_path_buf(),
        ledger,
    })
}
