//! # verity-compare
//!
//! Tree traversal, byte comparison, and discrepancy accounting.
//!
//! Call [`check::run`] to compare two roots end to end, or use the pieces
//! directly: [`walk`] enumerates one tree, [`classify::Comparator`] decides
//! one path, [`ledger::DiscrepancyLedger`] accumulates, [`report::render`]
//! turns the result into the plain-text report.

pub mod check;
pub mod classify;
pub mod error;
pub mod ledger;
pub mod report;
pub mod walk;

pub use check::CheckOutcome;
pub use classify::Comparator;
pub use error::CompareError;
pub use ledger::DiscrepancyLedger;
