//! Plain-text report rendering.
//!
//! The renderer only builds the string; where it is stored is the driver's
//! decision. [`report_file_name`] gives the conventional
//! `integrity_report_<epoch>.txt` name for callers that persist it.

use chrono::{DateTime, Utc};

use verity_core::types::RelativePath;

use crate::ledger::DiscrepancyLedger;

/// Render a deterministic report for `ledger`.
///
/// Layout:
/// - a header naming both root labels and the epoch timestamp,
/// - for a clean ledger, a single confirmation sentence,
/// - otherwise one section per non-empty category, in the fixed order
///   missing-from-first, missing-from-second, content-differs. Every
///   non-empty category is reported; co-occurring kinds all get a section,
///   matching what the prime-product status code encodes.
pub fn render(
    ledger: &DiscrepancyLedger,
    first_label: &str,
    second_label: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut report = format!(
        "Report on file trees {first_label} and {second_label} at {}",
        generated_at.timestamp()
    );

    if ledger.is_clean() {
        report.push_str("\n\nGood news! File trees are identical.");
        return report;
    }

    push_section(
        &mut report,
        "absent in the first tree, but present in the second",
        ledger.missing_from_first(),
    );
    push_section(
        &mut report,
        "absent in the second tree, but present in the first",
        ledger.missing_from_second(),
    );
    push_section(
        &mut report,
        "present in both trees, but are not identical",
        ledger.content_differs(),
    );
    report
}

/// `integrity_report_<epoch-seconds>.txt`
pub fn report_file_name(generated_at: DateTime<Utc>) -> String {
    format!("integrity_report_{}.txt", generated_at.timestamp())
}

/// Append one category section; skipped entirely when the category is empty.
/// Paths are listed comma-separated in ledger insertion order, with no
/// trailing separator.
fn push_section(report: &mut String, description: &str, paths: &[RelativePath]) {
    if paths.is_empty() {
        return;
    }
    let listed: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    report.push_str("\n\nThe following files are ");
    report.push_str(description);
    report.push_str(":\n\n    ");
    report.push_str(&listed.join(", "));
}
