//! Rule evaluation: decides a destination folder for a file.
//!
//! The active classification mode is a tagged enum carrying its own rule
//! payload; `evaluate` dispatches with an exhaustive match. Evaluators are
//! pure: they look only at the `FileRecord` snapshot and return a folder
//! path relative to the destination base, or `None` to exclude the file.
//! Exclusion is a normal outcome, not a failure.

pub mod date;
pub mod extension;
pub mod name;
pub mod record;
pub mod size;

pub use date::{DateGrouping, DatePredicate, DateRule, strftime_is_valid};
pub use extension::{ExtensionRule, MISC_FOLDER_NAME};
pub use name::{DEFAULT_NAME_TEMPLATE, NamePosition, NameRule};
pub use record::FileRecord;
pub use size::{DEFAULT_SIZE_TEMPLATE, SizeOp, SizeRule, SizeUnit};

use std::path::PathBuf;

/// Active classification strategy, one variant per mode.
#[derive(Debug, Clone)]
pub enum ClassificationMode {
    ByExtension(ExtensionRule),
    BySize(SizeRule),
    ByDate(DateRule),
    ByName(NameRule),
}

impl ClassificationMode {
    /// Short mode name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ClassificationMode::ByExtension(_) => "extension",
            ClassificationMode::BySize(_) => "size",
            ClassificationMode::ByDate(_) => "date",
            ClassificationMode::ByName(_) => "name",
        }
    }
}

/// Map a file's metadata to a destination folder relative to the base.
///
/// The empty path means "the base folder itself"; `None` excludes the file
/// from the operation (tallied as skipped by the driver).
pub fn evaluate(record: &FileRecord, mode: &ClassificationMode) -> Option<PathBuf> {
    match mode {
        ClassificationMode::ByExtension(rule) => rule.evaluate(record),
        ClassificationMode::BySize(rule) => rule.evaluate(record),
        ClassificationMode::ByDate(rule) => rule.evaluate(record),
        ClassificationMode::ByName(rule) => rule.evaluate(record),
    }
}
