//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use crate::fs_ops::DuplicatePolicy;
use crate::organize::Operation;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the organizer.
/// Per-run inputs (source/dest) normally arrive via CLI flags; the config
/// file supplies defaults for repeated runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default source folder to scan
    pub source_base: Option<PathBuf>,
    /// Default destination base folder
    pub dest_base: Option<PathBuf>,
    /// Copy or move matching files
    pub operation: Operation,
    /// How naming collisions at the destination are handled
    pub on_duplicate: DuplicatePolicy,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, report decisions but do not modify the filesystem
    pub preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_base: None,
            dest_base: None,
            operation: Operation::Copy,
            on_duplicate: DuplicatePolicy::Rename,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
            preview: false,
        }
    }
}
