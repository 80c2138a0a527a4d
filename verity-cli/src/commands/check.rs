//! `verity check` — compare two trees, write the report, exit with the code.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use verity_compare::{check, ledger::IDENTICAL_CODE, report, CheckOutcome};
use verity_core::{config, types::RelativePath};

/// Arguments for `verity check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// First tree root (omit both paths to use the saved configuration).
    pub first_root: Option<PathBuf>,

    /// Second tree root.
    pub second_root: Option<PathBuf>,

    /// Directory the report file is written into (defaults to the home directory).
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Emit a machine-readable JSON summary instead of the human one.
    #[arg(long)]
    pub json: bool,

    /// Suppress per-path detail in the summary.
    #[arg(long)]
    pub quiet: bool,
}

impl CheckArgs {
    pub fn run(self) -> Result<ExitCode> {
        let (first, second) = self.resolve_roots()?;

        let outcome = check::run(&first, &second).with_context(|| {
            format!(
                "integrity check of '{}' against '{}' failed",
                first.display(),
                second.display()
            )
        })?;

        let generated_at = Utc::now();
        let text = report::render(
            &outcome.ledger,
            &first.display().to_string(),
            &second.display().to_string(),
            generated_at,
        );

        let report_dir = match self.report_dir {
            Some(dir) => dir,
            None => dirs::home_dir().context("could not determine home directory")?,
        };
        let report_path = write_report(&report_dir, &text, generated_at)?;

        if self.json {
            print_json(&outcome, &report_path)?;
        } else {
            print_summary(&outcome, self.quiet);
            println!("Report written to {}.", report_path.display());
        }

        Ok(exit_code(outcome.status_code()))
    }

    fn resolve_roots(&self) -> Result<(PathBuf, PathBuf)> {
        match (&self.first_root, &self.second_root) {
            (Some(first), Some(second)) => Ok((first.clone(), second.clone())),
            (None, None) => {
                let saved = config::load().context(
                    "no roots given and no saved configuration — \
                     run `verity config set <first> <second>` first",
                )?;
                Ok((saved.roots.first_root, saved.roots.second_root))
            }
            _ => Err(anyhow::anyhow!(
                "provide both FIRST and SECOND, or neither to use the saved configuration"
            )),
        }
    }
}

/// Clean runs exit 0 (Unix convention); discrepancy codes 2–30 pass through
/// unchanged, so divisibility tests on a non-zero exit stay valid.
fn exit_code(status: u32) -> ExitCode {
    if status == IDENTICAL_CODE {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(status as u8)
    }
}

/// Persist the report next to nothing else: `.tmp` sibling, then rename.
fn write_report(dir: &Path, text: &str, generated_at: DateTime<Utc>) -> Result<PathBuf> {
    let path = dir.join(report::report_file_name(generated_at));
    let tmp = path.with_extension("txt.tmp");
    std::fs::write(&tmp, text)
        .with_context(|| format!("failed to write report to {}", tmp.display()))?;
    if let Err(err) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("failed to move report to {}", path.display()));
    }
    Ok(path)
}

fn print_summary(outcome: &CheckOutcome, quiet: bool) {
    let ledger = &outcome.ledger;
    if ledger.is_clean() {
        println!(
            "{} file trees are identical (status code 1)",
            "✓".green().bold()
        );
        return;
    }

    let total = ledger.missing_from_first().len()
        + ledger.missing_from_second().len()
        + ledger.content_differs().len();
    println!(
        "{} {} discrepant file path(s) (status code {})",
        "✗".red().bold(),
        total,
        ledger.status_code()
    );
    print_category(
        "absent in first tree",
        "■".yellow().bold(),
        ledger.missing_from_first(),
        quiet,
    );
    print_category(
        "absent in second tree",
        "■".magenta().bold(),
        ledger.missing_from_second(),
        quiet,
    );
    print_category(
        "content differs",
        "■".red().bold(),
        ledger.content_differs(),
        quiet,
    );
}

fn print_category(label: &str, indicator: ColoredString, paths: &[RelativePath], quiet: bool) {
    if paths.is_empty() {
        return;
    }
    println!("  {indicator} {label}: {}", paths.len());
    if !quiet {
        for path in paths {
            println!("      {path}");
        }
    }
}

#[derive(Serialize)]
struct CheckJson {
    first_root: String,
    second_root: String,
    status_code: u32,
    clean: bool,
    missing_from_first: Vec<String>,
    missing_from_second: Vec<String>,
    content_differs: Vec<String>,
    report_path: String,
}

fn print_json(outcome: &CheckOutcome, report_path: &Path) -> Result<()> {
    let payload = CheckJson {
        first_root: outcome.first_root.display().to_string(),
        second_root: outcome.second_root.display().to_string(),
        status_code: outcome.status_code(),
        clean: outcome.is_clean(),
        missing_from_first: path_strings(outcome.ledger.missing_from_first()),
        missing_from_second: path_strings(outcome.ledger.missing_from_second()),
        content_differs: path_strings(outcome.ledger.content_differs()),
        report_path: report_path.display().to_string(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize check JSON")?
    );
    Ok(())
}

fn path_strings(paths: &[RelativePath]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}
