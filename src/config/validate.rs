//! Run-path validation logic.
//! Verifies source/destination existence, readability/writability, and that
//! the two are not the same directory. Raised before any file is touched.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

/// Validate the per-run source and destination folders.
///
/// - source must exist, be a directory, and be readable.
/// - dest is created if missing and must be writable.
/// - source and dest must not resolve to the same path. Nesting is fine:
///   the driver skips files already under the destination.
pub fn validate_run_paths(source: &Path, dest: &Path) -> Result<()> {
    ensure_dir_exists_and_is_dir(source, "source folder")?;
    ensure_readable(source, "source folder")?;

    ensure_dir_is_or_create(dest, "destination folder")?;
    ensure_writable(dest, "destination folder")?;

    let src_real = fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
    let dest_real = fs::canonicalize(dest).unwrap_or_else(|_| dest.to_path_buf());
    if src_real == dest_real {
        bail!(
            "source and destination resolve to the same path: '{}'",
            src_real.display()
        );
    }

    info!(
        "Run paths validated: source='{}' dest='{}'",
        source.display(),
        dest.display()
    );
    Ok(())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!(
            "Cannot read {name} directory '{}'; check permissions",
            path.display()
        )
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {name} directory '{}'", path.display()))?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(path: &Path, name: &str) -> Result<()> {
    let probe = path.join(format!(".filesort_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            debug!("{name} writable: {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Cannot write to {name} '{}': {}", path.display(), e);
            bail!(
                "Cannot write to {name} '{}': {}. Check directory permissions.",
                path.display(),
                e
            )
        }
    }
}
