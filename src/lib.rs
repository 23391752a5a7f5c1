//! Core library for `filesort`.
//!
//! Sorts the files of a source tree into destination folders picked by a
//! classification rule (extension, size, date, or name), resolves duplicate
//! names by policy, and tallies the outcome of each run. The CLI surface,
//! config loading, and logging setup live here too so the binary stays a
//! thin shim.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod flatten;
pub mod fs_ops;
pub mod logging;
pub mod organize;
pub mod output;
pub mod rules;

pub use config::{Config, LogLevel, load_config_from_xml_path, load_effective_config};
pub use errors::OrganizeError;
pub use fs_ops::{DuplicatePolicy, MAX_RENAME_ATTEMPTS, resolve_collision};
pub use organize::{LogSink, Operation, OperationResult, OrganizePlan};
pub use rules::{ClassificationMode, FileRecord, evaluate};
