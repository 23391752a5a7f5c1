//! Driver runs under the size, date, and name rules.

use assert_fs::prelude::*;
use chrono::{Datelike, Duration, Local};

use filesort::fs_ops::DuplicatePolicy;
use filesort::organize::{Operation, OrganizePlan, run};
use filesort::rules::{
    ClassificationMode, DEFAULT_SIZE_TEMPLATE, DateGrouping, DatePredicate, DateRule,
    NamePosition, NameRule, SizeOp, SizeRule, SizeUnit,
};

fn plan(
    source: &assert_fs::fixture::ChildPath,
    dest: &assert_fs::fixture::ChildPath,
    mode: ClassificationMode,
) -> OrganizePlan {
    OrganizePlan {
        source_root: source.path().to_path_buf(),
        dest_root: dest.path().to_path_buf(),
        mode,
        on_duplicate: DuplicatePolicy::Rename,
        operation: Operation::Copy,
        preview: false,
    }
}

#[test]
fn size_rule_splits_on_the_exact_megabyte_boundary() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    source
        .child("exactly_1mb.bin")
        .write_binary(&vec![0u8; 1_048_576])
        .unwrap();
    source
        .child("one_byte_less.bin")
        .write_binary(&vec![0u8; 1_048_575])
        .unwrap();

    let rule = SizeRule {
        op: SizeOp::Ge,
        value: Some(1.0),
        unit: SizeUnit::Mb,
        template: DEFAULT_SIZE_TEMPLATE.to_string(),
    };
    let mut log: Vec<String> = Vec::new();
    let result = run(&plan(&source, &dest, ClassificationMode::BySize(rule)), &mut log).unwrap();

    assert_eq!(result.processed, 1);
    assert_eq!(result.skipped, 1);
    assert!(dest.child(">=1MB/exactly_1mb.bin").path().exists());
    assert!(!dest.child(">=1MB/one_byte_less.bin").path().exists());
}

#[test]
fn date_rule_groups_fresh_files_by_month() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    // The fixture file is created "now"; bracket today so it matches.
    source.child("today.txt").write_str("t").unwrap();
    let today = Local::now().date_naive();
    let rule = DateRule {
        predicate: DatePredicate::Between(today - Duration::days(1), today + Duration::days(1)),
        grouping: DateGrouping::Month,
    };

    let mut log: Vec<String> = Vec::new();
    let result = run(&plan(&source, &dest, ClassificationMode::ByDate(rule)), &mut log).unwrap();

    assert_eq!(result.processed, 1);
    let folder = format!("{:04}-{:02}", today.year(), today.month());
    dest.child(format!("{folder}/today.txt")).assert("t");
}

#[test]
fn date_rule_excludes_files_outside_the_range() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    source.child("today.txt").write_str("t").unwrap();
    let today = Local::now().date_naive();
    // A range entirely in the past: the fresh file must be skipped.
    let rule = DateRule {
        predicate: DatePredicate::Between(
            today - Duration::days(30),
            today - Duration::days(10),
        ),
        grouping: DateGrouping::Month,
    };

    let mut log: Vec<String> = Vec::new();
    let result = run(&plan(&source, &dest, ClassificationMode::ByDate(rule)), &mut log).unwrap();

    assert_eq!(result.processed, 0);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.errors, 0);
}

#[test]
fn name_rule_routes_matches_into_the_template_folder() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    source.child("Invoice_march.pdf").write_str("m").unwrap();
    source.child("receipt.pdf").write_str("r").unwrap();

    let rule = NameRule {
        search: "invoice".to_string(),
        position: NamePosition::Anywhere,
        char_limit: None,
        template: "Files containing '{text}'".to_string(),
    };
    let mut log: Vec<String> = Vec::new();
    let result = run(&plan(&source, &dest, ClassificationMode::ByName(rule)), &mut log).unwrap();

    assert_eq!(result.processed, 1);
    assert_eq!(result.skipped, 1);
    dest.child("Files containing 'invoice'/Invoice_march.pdf")
        .assert("m");
}
