use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn verity_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("verity"));
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

fn report_file_in(dir: &Path) -> PathBuf {
    fs::read_dir(dir)
        .expect("read report dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with("integrity_report_"))
                .unwrap_or(false)
        })
        .expect("report file present")
}

fn check_args(first: &Path, second: &Path, report_dir: &Path) -> Vec<String> {
    vec![
        "check".to_string(),
        first.display().to_string(),
        second.display().to_string(),
        "--report-dir".to_string(),
        report_dir.display().to_string(),
    ]
}

#[test]
fn clean_check_exits_zero_and_writes_good_news_report() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");
    let second = TempDir::new().expect("second");
    let reports = TempDir::new().expect("reports");
    fs::write(first.path().join("a.txt"), "same").expect("write");
    fs::write(second.path().join("a.txt"), "same").expect("write");

    verity_cmd(home.path())
        .args(check_args(first.path(), second.path(), reports.path()))
        .assert()
        .success()
        .stdout(contains("identical"))
        .stdout(contains("Report written to"));

    let report = fs::read_to_string(report_file_in(reports.path())).expect("read report");
    assert!(report.contains("Good news! File trees are identical."));
}

#[test]
fn missing_from_second_exits_three_and_lists_the_path() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");
    let second = TempDir::new().expect("second");
    let reports = TempDir::new().expect("reports");
    fs::write(first.path().join("a.txt"), "only first").expect("write");

    verity_cmd(home.path())
        .args(check_args(first.path(), second.path(), reports.path()))
        .assert()
        .code(3)
        .stdout(contains("absent in second tree"));

    let report = fs::read_to_string(report_file_in(reports.path())).expect("read report");
    assert!(report
        .contains("The following files are absent in the second tree, but present in the first"));
    assert!(report.contains("a.txt"));
    assert!(!report.contains("Good news"));
}

#[test]
fn all_three_kinds_exit_thirty_with_all_sections() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");
    let second = TempDir::new().expect("second");
    let reports = TempDir::new().expect("reports");
    fs::write(first.path().join("only_first.txt"), "1").expect("write");
    fs::write(second.path().join("only_second.txt"), "2").expect("write");
    fs::write(first.path().join("edited.txt"), "v1").expect("write");
    fs::write(second.path().join("edited.txt"), "v2").expect("write");

    verity_cmd(home.path())
        .args(check_args(first.path(), second.path(), reports.path()))
        .assert()
        .code(30);

    let report = fs::read_to_string(report_file_in(reports.path())).expect("read report");
    assert!(report.contains("absent in the first tree, but present in the second"));
    assert!(report.contains("absent in the second tree, but present in the first"));
    assert!(report.contains("present in both trees, but are not identical"));
}

#[test]
fn json_output_has_stable_schema() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");
    let second = TempDir::new().expect("second");
    let reports = TempDir::new().expect("reports");
    fs::write(first.path().join("n.bin"), "aaaa").expect("write");
    fs::write(second.path().join("n.bin"), "aaab").expect("write");

    let mut args = check_args(first.path(), second.path(), reports.path());
    args.push("--json".to_string());
    let assert = verity_cmd(home.path()).args(args).assert().code(5);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("parse check json");

    let keys: BTreeSet<String> = payload
        .as_object()
        .expect("check root object")
        .keys()
        .cloned()
        .collect();
    let expected: BTreeSet<String> = [
        "first_root",
        "second_root",
        "status_code",
        "clean",
        "missing_from_first",
        "missing_from_second",
        "content_differs",
        "report_path",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();
    assert_eq!(keys, expected, "check JSON schema changed");

    assert_eq!(payload["status_code"], 5);
    assert_eq!(payload["clean"], false);
    assert_eq!(payload["content_differs"][0], "n.bin");
    assert!(payload["report_path"]
        .as_str()
        .expect("report path")
        .contains("integrity_report_"));
}

#[test]
fn single_path_argument_is_rejected() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");

    verity_cmd(home.path())
        .args(["check", &first.path().display().to_string()])
        .assert()
        .failure()
        .stderr(contains("provide both FIRST and SECOND"));
}

#[test]
fn bad_root_aborts_without_writing_a_report() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");
    let reports = TempDir::new().expect("reports");
    let missing = first.path().join("does_not_exist");

    verity_cmd(home.path())
        .args(check_args(first.path(), &missing, reports.path()))
        .assert()
        .failure()
        .stderr(contains("not an existing directory"));

    let leftover = fs::read_dir(reports.path())
        .expect("read report dir")
        .count();
    assert_eq!(leftover, 0, "no partial report may be written on failure");
}

#[test]
fn quiet_suppresses_per_path_detail() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");
    let second = TempDir::new().expect("second");
    let reports = TempDir::new().expect("reports");
    fs::write(first.path().join("gone.txt"), "x").expect("write");

    let mut args = check_args(first.path(), second.path(), reports.path());
    args.push("--quiet".to_string());
    let assert = verity_cmd(home.path()).args(args).assert().code(3);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");

    assert!(stdout.contains("absent in second tree"));
    assert!(
        !stdout.contains("      gone.txt"),
        "per-path detail must be suppressed under --quiet"
    );
}

#[test]
fn subdirectory_paths_appear_relative_in_the_report() {
    let home = TempDir::new().expect("home");
    let first = TempDir::new().expect("first");
    let second = TempDir::new().expect("second");
    let reports = TempDir::new().expect("reports");
    fs::create_dir_all(first.path().join("photos/2024")).expect("mkdir");
    fs::write(first.path().join("photos/2024/a.jpg"), "img").expect("write");

    verity_cmd(home.path())
        .args(check_args(first.path(), second.path(), reports.path()))
        .assert()
        .code(3);

    let report = fs::read_to_string(report_file_in(reports.path())).expect("read report");
    assert!(report.contains("photos/2024/a.jpg"));
}
