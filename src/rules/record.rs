//! Per-file metadata snapshot.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Immutable snapshot of one file's metadata, taken once at traversal time.
/// Classification never re-reads the filesystem.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Full file name including the extension (lossy for non-UTF-8 names;
    /// name matching is string-based).
    pub name: String,
    /// Lowercased extension without the dot; `None` when the name has none.
    pub extension: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, falling back to modification time on filesystems
    /// without birth times.
    pub created: DateTime<Local>,
}

impl FileRecord {
    /// Stat `path` once and build the snapshot.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)
            .with_context(|| format!("stat failed for '{}'", path.display()))?;
        let created = meta
            .created()
            .or_else(|_| meta.modified())
            .with_context(|| format!("no usable timestamp for '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("path has no file name: '{}'", path.display()))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            extension,
            size: meta.len(),
            created: DateTime::<Local>::from(created),
        })
    }

    /// Creation date with time-of-day dropped; date rules compare at this
    /// granularity only.
    pub fn created_date(&self) -> NaiveDate {
        self.created.date_naive()
    }
}
