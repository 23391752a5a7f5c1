//! Copy/move primitives for single files.

use anyhow::{Context, Result};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Copy `src` to `dest`, carrying the source mtime (best-effort).
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest)
        .with_context(|| format!("copy failed {} -> {}", src.display(), dest.display()))?;
    if let Ok(meta) = fs::metadata(src) {
        let mtime = FileTime::from_last_modification_time(&meta);
        let _ = set_file_mtime(dest, mtime);
    }
    Ok(())
}

/// Move `src` to `dest`: atomic rename when possible, otherwise
/// copy + remove (crosses filesystems).
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed file atomically");
            Ok(())
        }
        Err(e) => {
            debug!(error = %e, "rename failed, falling back to copy+remove");
            copy_file(src, dest)?;
            fs::remove_file(src)
                .with_context(|| format!("failed to remove original file {}", src.display()))?;
            Ok(())
        }
    }
}
