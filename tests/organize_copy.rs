//! End-to-end organize runs in copy mode with the extension rule.

use assert_fs::prelude::*;
use std::path::PathBuf;

use filesort::fs_ops::DuplicatePolicy;
use filesort::organize::{Operation, OrganizePlan, run};
use filesort::rules::{ClassificationMode, ExtensionRule, MISC_FOLDER_NAME};

fn plan(source: PathBuf, dest: PathBuf, rule: ExtensionRule) -> OrganizePlan {
    OrganizePlan {
        source_root: source,
        dest_root: dest,
        mode: ClassificationMode::ByExtension(rule),
        on_duplicate: DuplicatePolicy::Rename,
        operation: Operation::Copy,
        preview: false,
    }
}

#[test]
fn copies_into_extension_and_misc_folders() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    source.child("a.txt").write_str("a").unwrap();
    source.child("nested/b.txt").write_str("b").unwrap();
    source.child("c.bin").write_str("c").unwrap();

    let mut log: Vec<String> = Vec::new();
    let result = run(
        &plan(
            source.path().to_path_buf(),
            dest.path().to_path_buf(),
            ExtensionRule::from_list("txt", true),
        ),
        &mut log,
    )
    .unwrap();

    assert_eq!(result.processed, 3);
    assert_eq!(result.skipped, 0);
    assert_eq!(result.errors, 0);

    dest.child("txt files/a.txt").assert("a");
    dest.child("txt files/b.txt").assert("b");
    dest.child(format!("{MISC_FOLDER_NAME}/c.bin")).assert("c");

    // Copy leaves the sources in place.
    source.child("a.txt").assert("a");
    source.child("nested/b.txt").assert("b");

    // One outcome line per processed file, mirrored into the result log.
    assert_eq!(result.log.len(), 3);
    assert_eq!(log, result.log);
    assert!(log.iter().all(|l| l.starts_with("Copied: ")));
}

#[test]
fn unmatched_files_count_as_skipped_not_errors() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    source.child("keep.txt").write_str("k").unwrap();
    source.child("drop.bin").write_str("d").unwrap();

    let mut log: Vec<String> = Vec::new();
    let result = run(
        &plan(
            source.path().to_path_buf(),
            dest.path().to_path_buf(),
            ExtensionRule::from_list("txt", false),
        ),
        &mut log,
    )
    .unwrap();

    assert_eq!(result.processed, 1);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.errors, 0);
    dest.child("txt files/keep.txt").assert("k");
    assert!(!dest.child(format!("{MISC_FOLDER_NAME}/drop.bin")).path().exists());
}

#[test]
fn empty_extension_list_routes_everything_to_base() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    source.child("one.txt").write_str("1").unwrap();
    source.child("two.bin").write_str("2").unwrap();

    let mut log: Vec<String> = Vec::new();
    let result = run(
        &plan(
            source.path().to_path_buf(),
            dest.path().to_path_buf(),
            ExtensionRule::from_list("", true),
        ),
        &mut log,
    )
    .unwrap();

    assert_eq!(result.processed, 2);
    dest.child("one.txt").assert("1");
    dest.child("two.bin").assert("2");
}

#[test]
fn dest_nested_in_source_is_not_reprocessed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("in");
    let dest = source.child("sorted");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    source.child("a.txt").write_str("a").unwrap();
    // Pre-existing file under the destination must be left alone.
    dest.child("txt files/old.txt").write_str("old").unwrap();

    let mut log: Vec<String> = Vec::new();
    let result = run(
        &plan(
            source.path().to_path_buf(),
            dest.path().to_path_buf(),
            ExtensionRule::from_list("txt", false),
        ),
        &mut log,
    )
    .unwrap();

    assert_eq!(result.processed, 1);
    assert_eq!(result.errors, 0);
    dest.child("txt files/a.txt").assert("a");
    dest.child("txt files/old.txt").assert("old");
    assert!(!dest.child("txt files/old_1.txt").path().exists());
}
