//! Discrepancy accumulation and the prime-product status code.

use verity_core::types::{Classification, RelativePath};

/// Status code factor: no discrepancies of any kind.
pub const IDENTICAL_CODE: u32 = 1;
/// Status code factor: at least one file absent under the first root.
pub const MISSING_FROM_FIRST_CODE: u32 = 2;
/// Status code factor: at least one file absent under the second root.
pub const MISSING_FROM_SECOND_CODE: u32 = 3;
/// Status code factor: at least one file present in both with differing bytes.
pub const CONTENT_DIFFERS_CODE: u32 = 5;

/// Accumulates classified discrepancies into three insertion-ordered
/// collections.
///
/// The collections are plain `Vec`s rather than sets: callers classify each
/// path exactly once, and insertion order is what makes report output
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscrepancyLedger {
    missing_from_first: Vec<RelativePath>,
    missing_from_second: Vec<RelativePath>,
    content_differs: Vec<RelativePath>,
}

impl DiscrepancyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the path to the matching collection; `Identical` is a no-op.
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Identical => {}
            Classification::MissingFromFirst(path) => self.missing_from_first.push(path),
            Classification::MissingFromSecond(path) => self.missing_from_second.push(path),
            Classification::ContentDiffers(path) => self.content_differs.push(path),
        }
    }

    pub fn missing_from_first(&self) -> &[RelativePath] {
        &self.missing_from_first
    }

    pub fn missing_from_second(&self) -> &[RelativePath] {
        &self.missing_from_second
    }

    pub fn content_differs(&self) -> &[RelativePath] {
        &self.content_differs
    }

    /// Product of the prime factors whose collections are non-empty.
    ///
    /// Because 2, 3, and 5 are pairwise coprime, the result identifies which
    /// discrepancy kinds occurred (by divisibility) regardless of how many
    /// paths each category holds. `1` means a clean run.
    pub fn status_code(&self) -> u32 {
        let mut code = IDENTICAL_CODE;
        if !self.missing_from_first.is_empty() {
            code *= MISSING_FROM_FIRST_CODE;
        }
        if !self.missing_from_second.is_empty() {
            code *= MISSING_FROM_SECOND_CODE;
        }
        if !self.content_differs.is_empty() {
            code *= CONTENT_DIFFERS_CODE;
        }
        code
    }

    pub fn is_clean(&self) -> bool {
        self.status_code() == IDENTICAL_CODE
    }
}
