//! Domain types for tree comparison.
//!
//! All absolute path fields use `PathBuf`; never `&str` or `String` for
//! filesystem paths. Locations *inside* a tree use [`RelativePath`], which is
//! root-agnostic so the same value addresses a file under either root.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PathError;

// ---------------------------------------------------------------------------
// RelativePath
// ---------------------------------------------------------------------------

/// A location relative to a tree root: an ordered sequence of folder-name
/// segments. The empty sequence is the root itself.
///
/// Equality, ordering, and hashing are segment-wise, so a `BTreeSet` of
/// relative paths iterates in a deterministic order.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RelativePath(Vec<String>);

impl RelativePath {
    /// The root of a tree (no segments).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Extend this path with one more segment.
    ///
    /// Rejects names that cannot come from a well-formed directory listing:
    /// empty strings, `.`, `..`, and anything containing a path separator.
    pub fn join(&self, segment: &str) -> Result<RelativePath, PathError> {
        if segment.is_empty() {
            return Err(PathError::EmptySegment);
        }
        if segment == "." || segment == ".." || segment.contains('/') || segment.contains('\\') {
            return Err(PathError::MalformedSegment(segment.to_owned()));
        }
        let mut segments = self.0.clone();
        segments.push(segment.to_owned());
        Ok(Self(segments))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Absolute location of this path under `root`.
    pub fn resolve_under(&self, root: &Path) -> PathBuf {
        let mut abs = root.to_path_buf();
        for segment in &self.0 {
            abs.push(segment);
        }
        abs
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of a directory entry met during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// The single category assigned to one relative file path.
///
/// Classification is total and mutually exclusive: every file path visited
/// gets exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Present under both roots with byte-identical content.
    Identical,
    /// Absent under the first root, present under the second.
    MissingFromFirst(RelativePath),
    /// Absent under the second root, present under the first.
    MissingFromSecond(RelativePath),
    /// Present under both roots with differing content.
    ContentDiffers(RelativePath),
}

// ---------------------------------------------------------------------------
// Configuration payload
// ---------------------------------------------------------------------------

/// The two tree roots a check runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootPair {
    /// Absolute path to the first tree root.
    pub first_root: PathBuf,
    /// Absolute path to the second tree root.
    pub second_root: PathBuf,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
