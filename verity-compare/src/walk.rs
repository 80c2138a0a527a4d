//! Deterministic depth-first traversal of a single tree root.
//!
//! Every file and every subdirectory reachable from the root is enumerated
//! exactly once, in a fixed order: within each directory the files come
//! first, then the subdirectories, both sorted lexicographically by name.
//! The traversal is plain recursive descent — control returns to the caller
//! when a subtree is exhausted, so no completed-folders bookkeeping is
//! needed for termination.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use verity_core::types::{EntryKind, RelativePath};

use crate::error::{io_err, CompareError};

/// One enumerated entry: where it sits relative to the root, and what it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: RelativePath,
    pub kind: EntryKind,
}

/// Enumerate every entry reachable from `root`.
///
/// The root itself contributes no entry. Symlinks are reported as files and
/// never descended into, so a link cycle cannot recurse.
///
/// Fails fatally if `root` is not an existing directory, or if any directory
/// on the way cannot be listed — a partial walk would produce a falsely
/// clean result downstream.
pub fn walk(root: &Path) -> Result<Vec<WalkEntry>, CompareError> {
    ensure_directory(root)?;
    let mut entries = Vec::new();
    descend(root, &RelativePath::root(), &mut entries)?;
    tracing::debug!("walked {}: {} entries", root.display(), entries.len());
    Ok(entries)
}

/// The set of relative *file* paths reachable from `root`.
///
/// `BTreeSet` keeps the result deduplicated and sorted segment-wise, so the
/// union of two walks iterates in a reproducible order.
pub fn file_paths(root: &Path) -> Result<BTreeSet<RelativePath>, CompareError> {
    Ok(walk(root)?
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .map(|entry| entry.path)
        .collect())
}

/// Check that `root` exists and is a directory, before any traversal begins.
pub(crate) fn ensure_directory(root: &Path) -> Result<(), CompareError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CompareError::RootNotADirectory {
            path: root.to_path_buf(),
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(CompareError::RootNotADirectory {
            path: root.to_path_buf(),
        }),
        Err(err) => Err(io_err(root, err)),
    }
}

fn descend(
    root: &Path,
    here: &RelativePath,
    out: &mut Vec<WalkEntry>,
) -> Result<(), CompareError> {
    let abs = here.resolve_under(root);

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(&abs).map_err(|e| io_err(&abs, e))? {
        let entry = entry.map_err(|e| io_err(&abs, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // file_type() does not follow symlinks; a link to a directory stays
        // an opaque file here.
        let file_type = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
        if file_type.is_dir() {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }
    files.sort();
    dirs.sort();

    for name in files {
        out.push(WalkEntry {
            path: child(here, &name, &abs)?,
            kind: EntryKind::File,
        });
    }
    for name in dirs {
        let rel = child(here, &name, &abs)?;
        out.push(WalkEntry {
            path: rel.clone(),
            kind: EntryKind::Directory,
        });
        descend(root, &rel, out)?;
    }
    Ok(())
}

fn child(
    here: &RelativePath,
    name: &str,
    abs: &Path,
) -> Result<RelativePath, CompareError> {
    here.join(name).map_err(|source| CompareError::Entry {
        path: abs.to_path_buf(),
        source,
    })
}
