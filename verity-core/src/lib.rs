//! Verity core library — domain types, roots configuration, errors.
//!
//! Public API surface:
//! - [`types`] — [`RelativePath`], classifications, the persisted root pair
//! - [`error`] — [`ConfigError`] and [`PathError`]
//! - [`config`] — load / save of `~/.verity/config.yaml`

pub mod config;
pub mod error;
pub mod types;

pub use error::{ConfigError, PathError};
pub use types::{Classification, EntryKind, RelativePath, RootPair};
