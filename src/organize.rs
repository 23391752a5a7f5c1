//! Traversal driver: walks the source tree and applies the rule evaluator
//! and duplicate resolver to every file.
//!
//! One file at a time, synchronous. Per-file failures are logged, counted,
//! and never abort the run; the tally and its ordered log are owned by the
//! driver for the duration of one run.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::OrganizeError;
use crate::fs_ops::{self, DuplicatePolicy, resolve_collision};
use crate::rules::{ClassificationMode, FileRecord, evaluate};

/// Whether matched files are copied or moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Operation {
    #[default]
    Copy,
    Move,
}

impl Operation {
    /// Parse config-file spellings (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "copy" => Some(Operation::Copy),
            "move" => Some(Operation::Move),
            _ => None,
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Operation::Copy => "Copied",
            Operation::Move => "Moved",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Copy => "copy",
            Operation::Move => "move",
        };
        f.write_str(s)
    }
}

/// Append-only sink for per-file outcome lines; one human-readable line per
/// event, no machine-parseable schema.
pub trait LogSink {
    fn line(&mut self, msg: &str);
}

/// Buffer sink for tests and embedders.
impl LogSink for Vec<String> {
    fn line(&mut self, msg: &str) {
        self.push(msg.to_string());
    }
}

/// Immutable per-run plan, assembled once before the traversal starts.
#[derive(Debug, Clone)]
pub struct OrganizePlan {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub mode: ClassificationMode,
    pub on_duplicate: DuplicatePolicy,
    pub operation: Operation,
    /// Take every decision but mutate nothing; log would-be destinations.
    pub preview: bool,
}

/// Tally of one run plus the ordered per-file outcome log.
#[derive(Debug, Clone, Default)]
pub struct OperationResult {
    pub processed: u64,
    pub skipped: u64,
    pub errors: u64,
    pub log: Vec<String>,
}

impl OperationResult {
    pub fn summary(&self) -> String {
        format!(
            "{} processed, {} skipped, {} errors",
            self.processed, self.skipped, self.errors
        )
    }

    pub(crate) fn note(&mut self, sink: &mut dyn LogSink, line: String) {
        sink.line(&line);
        self.log.push(line);
    }
}

enum Outcome {
    Done(PathBuf),
    Planned(PathBuf),
    NoMatch,
    DuplicateSkipped,
}

/// Run one organize pass over the plan's source tree.
///
/// The listing is snapshotted before anything is mutated so moves cannot
/// feed the walk; files already under the destination root are left alone
/// when the destination nests inside the source.
pub fn run(plan: &OrganizePlan, sink: &mut dyn LogSink) -> Result<OperationResult> {
    if !plan.source_root.is_dir() {
        return Err(OrganizeError::SourceNotFound(plan.source_root.clone()).into());
    }

    let mut result = OperationResult::default();
    let files = snapshot_files(&plan.source_root, &plan.dest_root, &mut result, sink);
    debug!(
        count = files.len(),
        mode = plan.mode.label(),
        preview = plan.preview,
        "organize: snapshot complete"
    );

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match process_one(plan, &path) {
            Ok(Outcome::Done(dest)) => {
                result.processed += 1;
                let dest_dir = dest.parent().unwrap_or(&plan.dest_root);
                result.note(
                    sink,
                    format!("{}: {} -> {}", plan.operation.past_tense(), name, dest_dir.display()),
                );
            }
            Ok(Outcome::Planned(dest)) => {
                result.processed += 1;
                result.note(sink, format!("Preview: {} -> {}", name, dest.display()));
            }
            Ok(Outcome::NoMatch) => {
                result.skipped += 1;
                debug!(file = %path.display(), "no rule match, excluded");
            }
            Ok(Outcome::DuplicateSkipped) => {
                result.skipped += 1;
                result.note(sink, format!("Skipped duplicate: {name}"));
            }
            Err(e) => {
                result.errors += 1;
                result.note(sink, format!("Error processing {}: {e:#}", path.display()));
                warn!(file = %path.display(), error = %e, "per-file failure, continuing");
            }
        }
    }

    info!(
        processed = result.processed,
        skipped = result.skipped,
        errors = result.errors,
        "organize run complete"
    );
    Ok(result)
}

/// Collect every file under `source_root`, tallying unreadable entries as
/// errors instead of aborting the walk.
fn snapshot_files(
    source_root: &Path,
    dest_root: &Path,
    result: &mut OperationResult,
    sink: &mut dyn LogSink,
) -> Vec<PathBuf> {
    let dest_real = fs::canonicalize(dest_root).unwrap_or_else(|_| dest_root.to_path_buf());
    let mut files = Vec::new();
    for entry in WalkDir::new(source_root) {
        match entry {
            Ok(e) if e.file_type().is_file() => {
                let path = e.into_path();
                let real = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
                if !real.starts_with(&dest_real) {
                    files.push(path);
                }
            }
            Ok(_) => {}
            Err(e) => {
                result.errors += 1;
                let where_ = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| source_root.display().to_string());
                result.note(sink, format!("Error reading {where_}: {e}"));
                warn!(error = %e, "walk error, continuing");
            }
        }
    }
    files
}

fn process_one(plan: &OrganizePlan, path: &Path) -> Result<Outcome> {
    let record = FileRecord::from_path(path)?;
    let Some(rel) = evaluate(&record, &plan.mode) else {
        return Ok(Outcome::NoMatch);
    };

    let dest_dir = plan.dest_root.join(&rel);
    if !plan.preview {
        fs::create_dir_all(&dest_dir)
            .with_context(|| format!("create destination dir '{}'", dest_dir.display()))?;
    }

    let candidate = dest_dir.join(&record.name);
    let Some(final_dest) = resolve_collision(&candidate, plan.on_duplicate)? else {
        return Ok(Outcome::DuplicateSkipped);
    };

    if plan.preview {
        return Ok(Outcome::Planned(final_dest));
    }

    match plan.operation {
        Operation::Copy => fs_ops::copy_file(path, &final_dest)?,
        Operation::Move => fs_ops::move_file(path, &final_dest)?,
    }
    Ok(Outcome::Done(final_dest))
}
