//! End-to-end smoke tests of the compiled binary.

use assert_fs::prelude::*;
use std::process::Command;

/// Minimal config file so the test never touches (or creates) the user's
/// real config.
fn isolated_config(temp: &assert_fs::TempDir) -> std::path::PathBuf {
    let cfg = temp.child("config.xml");
    cfg.write_str("<config>\n  <log_level>quiet</log_level>\n</config>\n")
        .unwrap();
    cfg.path().to_path_buf()
}

fn filesort() -> Command {
    let me = assert_cmd::cargo::cargo_bin!("filesort");
    Command::new(me)
}

#[test]
fn extension_move_end_to_end() {
    let temp = assert_fs::TempDir::new().unwrap();
    let cfg = isolated_config(&temp);
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();
    source.child("a.txt").write_str("hello").unwrap();
    source.child("b.bin").write_str("blob").unwrap();

    let out = filesort()
        .env("FILESORT_CONFIG", &cfg)
        .args([
            "extension",
            "--types",
            "txt",
            "--source",
            source.path().to_str().unwrap(),
            "--dest",
            dest.path().to_str().unwrap(),
            "--operation",
            "move",
        ])
        .output()
        .expect("spawn binary");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(
        stdout.contains("Operation complete: 1 processed, 1 skipped, 0 errors"),
        "unexpected stdout: {stdout}"
    );

    dest.child("txt files/a.txt").assert("hello");
    assert!(!source.child("a.txt").path().exists());
    source.child("b.bin").assert("blob");
}

#[test]
fn preview_reports_and_mutates_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let cfg = isolated_config(&temp);
    let source = temp.child("in");
    let dest = temp.child("out");
    source.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();
    source.child("a.txt").write_str("hello").unwrap();

    let out = filesort()
        .env("FILESORT_CONFIG", &cfg)
        .args([
            "extension",
            "--types",
            "txt",
            "--source",
            source.path().to_str().unwrap(),
            "--dest",
            dest.path().to_str().unwrap(),
            "--preview",
        ])
        .output()
        .expect("spawn binary");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success());
    assert!(stdout.contains("Preview: a.txt"), "unexpected stdout: {stdout}");
    assert!(
        stdout.contains("Preview complete: 1 files would be processed"),
        "unexpected stdout: {stdout}"
    );

    source.child("a.txt").assert("hello");
    assert!(!dest.child("txt files").path().exists());
}

#[test]
fn missing_source_is_an_immediate_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let cfg = isolated_config(&temp);
    let dest = temp.child("out");
    dest.create_dir_all().unwrap();

    let out = filesort()
        .env("FILESORT_CONFIG", &cfg)
        .args(["extension", "--dest", dest.path().to_str().unwrap()])
        .output()
        .expect("spawn binary");

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no source folder"), "unexpected stderr: {stderr}");
}

#[test]
fn nonexistent_source_fails_before_any_work() {
    let temp = assert_fs::TempDir::new().unwrap();
    let cfg = isolated_config(&temp);
    let dest = temp.child("out");
    dest.create_dir_all().unwrap();

    let out = filesort()
        .env("FILESORT_CONFIG", &cfg)
        .args([
            "extension",
            "--source",
            temp.child("missing").path().to_str().unwrap(),
            "--dest",
            dest.path().to_str().unwrap(),
        ])
        .output()
        .expect("spawn binary");

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("does not exist"), "unexpected stderr: {stderr}");
}

#[test]
fn print_config_mentions_the_env_override() {
    let temp = assert_fs::TempDir::new().unwrap();
    let cfg = isolated_config(&temp);

    let out = filesort()
        .env("FILESORT_CONFIG", &cfg)
        .arg("print-config")
        .output()
        .expect("spawn binary");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("FILESORT_CONFIG"), "unexpected stdout: {stdout}");
}
