//! Duplicate-name resolution.
//!
//! Policy:
//! - Skip: an existing file at the destination excludes the incoming one.
//! - Overwrite: keep the requested path; the caller replaces the file.
//! - Rename: append "_1", "_2", ... before the extension until a free name
//!   is found, up to MAX_RENAME_ATTEMPTS.
//!
//! Notes:
//! - Decisions are based on current filesystem state only; nothing is
//!   created here.

use clap::ValueEnum;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::errors::OrganizeError;

/// How a naming collision at the destination is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicatePolicy {
    /// Pick a unique name by appending "_n" before the extension.
    #[default]
    Rename,
    /// Use the requested name and overwrite the existing file.
    Overwrite,
    /// Leave both files alone; the incoming file is skipped.
    Skip,
}

impl DuplicatePolicy {
    /// Parse config-file spellings (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rename" => Some(DuplicatePolicy::Rename),
            "overwrite" => Some(DuplicatePolicy::Overwrite),
            "skip" => Some(DuplicatePolicy::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DuplicatePolicy::Rename => "rename",
            DuplicatePolicy::Overwrite => "overwrite",
            DuplicatePolicy::Skip => "skip",
        };
        f.write_str(s)
    }
}

/// Upper bound on rename retries; exhausting it is a distinct error rather
/// than an endless loop over a pathologically crowded directory.
pub const MAX_RENAME_ATTEMPTS: u32 = 10_000;

/// Decide the final destination for `candidate` under `policy`.
///
/// Returns the candidate unchanged when nothing exists there. Otherwise:
/// Overwrite keeps it, Skip yields `None`, Rename probes "stem_1.ext",
/// "stem_2.ext", ... and returns the first free name.
pub fn resolve_collision(
    candidate: &Path,
    policy: DuplicatePolicy,
) -> Result<Option<PathBuf>, OrganizeError> {
    if !candidate.exists() {
        return Ok(Some(candidate.to_path_buf()));
    }

    match policy {
        DuplicatePolicy::Overwrite => Ok(Some(candidate.to_path_buf())),
        DuplicatePolicy::Skip => Ok(None),
        DuplicatePolicy::Rename => {
            // Stem and extension kept as OsString so non-UTF-8 names survive.
            let stem = candidate
                .file_stem()
                .map(|s| s.to_os_string())
                .unwrap_or_else(|| OsString::from("file"));
            let ext = candidate.extension().map(|e| e.to_os_string());

            let mut n: u32 = 1;
            loop {
                let mut name = OsString::new();
                name.push(&stem);
                name.push(format!("_{n}"));
                if let Some(e) = &ext {
                    name.push(".");
                    name.push(e);
                }
                let alt = candidate.with_file_name(&name);
                if !alt.exists() {
                    return Ok(Some(alt));
                }
                if n == 3 {
                    trace!(candidate = %candidate.display(), "multiple collisions, continuing to search for a free suffix");
                }
                if n >= MAX_RENAME_ATTEMPTS {
                    return Err(OrganizeError::RenameAttemptsExhausted {
                        path: candidate.to_path_buf(),
                        attempts: MAX_RENAME_ATTEMPTS,
                    });
                }
                n += 1;
            }
        }
    }
}
