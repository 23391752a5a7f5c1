//! Flatten driver: pulls files out of nested folders into one destination.
//!
//! Files directly under the source root are already flat and are never
//! touched; only depth >= 2 is collected. Shares the duplicate policy,
//! transfer primitives, tally, and error-isolation contract with the
//! organize driver.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::OrganizeError;
use crate::fs_ops::{self, DuplicatePolicy, resolve_collision};
use crate::organize::{LogSink, Operation, OperationResult};

#[derive(Debug, Clone)]
pub struct FlattenPlan {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    /// Accepted extensions (lowercased, dotless); `None` flattens every
    /// file.
    pub extensions: Option<BTreeSet<String>>,
    pub on_duplicate: DuplicatePolicy,
    pub operation: Operation,
    pub preview: bool,
}

impl FlattenPlan {
    fn wants(&self, path: &Path) -> bool {
        let Some(accepted) = &self.extensions else {
            return true;
        };
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| accepted.contains(&e.to_ascii_lowercase()))
    }
}

/// Flatten the plan's source tree into its destination root.
pub fn run(plan: &FlattenPlan, sink: &mut dyn LogSink) -> Result<OperationResult> {
    if !plan.source_root.is_dir() {
        return Err(OrganizeError::SourceNotFound(plan.source_root.clone()).into());
    }

    let dest_real =
        fs::canonicalize(&plan.dest_root).unwrap_or_else(|_| plan.dest_root.clone());
    let mut result = OperationResult::default();

    // Snapshot before mutating; top-level files (depth 1) stay put.
    let mut files = Vec::new();
    for entry in WalkDir::new(&plan.source_root).min_depth(2) {
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
                    .unwrap_or_else(|| plan.source_root.display().to_string());
                result.note(sink, format!("Error reading {where_}: {e}"));
                warn!(error = %e, "walk error, continuing");
            }
        }
    }
    debug!(count = files.len(), preview = plan.preview, "flatten: snapshot complete");

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !plan.wants(&path) {
            result.skipped += 1;
            debug!(file = %path.display(), "extension filtered out");
            continue;
        }
        match flatten_one(plan, &path) {
            Ok(Some(dest)) => {
                result.processed += 1;
                let verb = if plan.preview {
                    "Preview"
                } else {
                    match plan.operation {
                        Operation::Copy => "Copied",
                        Operation::Move => "Moved",
                    }
                };
                result.note(sink, format!("{}: {} -> {}", verb, name, dest.display()));
            }
            Ok(None) => {
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
        "flatten run complete"
    );
    Ok(result)
}

fn flatten_one(plan: &FlattenPlan, path: &Path) -> Result<Option<PathBuf>> {
    let name = path
        .file_name()
        .with_context(|| format!("path has no file name: '{}'", path.display()))?;
    if !plan.preview {
        fs::create_dir_all(&plan.dest_root).with_context(|| {
            format!("create destination dir '{}'", plan.dest_root.display())
        })?;
    }

    let candidate = plan.dest_root.join(name);
    let Some(final_dest) = resolve_collision(&candidate, plan.on_duplicate)? else {
        return Ok(None);
    };

    if plan.preview {
        return Ok(Some(final_dest));
    }

    match plan.operation {
        Operation::Copy => fs_ops::copy_file(path, &final_dest)?,
        Operation::Move => fs_ops::move_file(path, &final_dest)?,
    }
    Ok(Some(final_dest))
}
