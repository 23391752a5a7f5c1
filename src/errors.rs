//! Typed error definitions for filesort.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("Source folder not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("No free destination name for {path} after {attempts} attempts")]
    RenameAttemptsExhausted { path: PathBuf, attempts: u32 },
}
