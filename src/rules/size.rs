//! Size rule: match files against a byte threshold.

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

use super::record::FileRecord;

pub const DEFAULT_SIZE_TEMPLATE: &str = "{operator}{value}{unit}";

/// Comparison operator applied to the file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizeOp {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
}

impl fmt::Display for SizeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SizeOp::Lt => "<",
            SizeOp::Le => "<=",
            SizeOp::Eq => "=",
            SizeOp::Ge => ">=",
            SizeOp::Gt => ">",
        };
        f.write_str(s)
    }
}

/// Size unit; each step is 1024x the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SizeUnit {
    Bytes,
    #[default]
    Kb,
    Mb,
    Gb,
}

impl SizeUnit {
    pub fn multiplier(&self) -> f64 {
        match self {
            SizeUnit::Bytes => 1.0,
            SizeUnit::Kb => 1024.0,
            SizeUnit::Mb => 1024.0 * 1024.0,
            SizeUnit::Gb => 1024.0 * 1024.0 * 1024.0,
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SizeUnit::Bytes => "bytes",
            SizeUnit::Kb => "KB",
            SizeUnit::Mb => "MB",
            SizeUnit::Gb => "GB",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct SizeRule {
    pub op: SizeOp,
    /// Threshold value in `unit`s; `None` routes every file to the base
    /// folder.
    pub value: Option<f64>,
    pub unit: SizeUnit,
    /// Folder name template with {operator}/{value}/{unit} placeholders.
    pub template: String,
}

impl SizeRule {
    pub fn evaluate(&self, record: &FileRecord) -> Option<PathBuf> {
        let Some(value) = self.value else {
            return Some(PathBuf::new());
        };
        let target = value * self.unit.multiplier();
        let size = record.size as f64;
        // "=" means exact byte equality of the converted threshold.
        let matched = match self.op {
            SizeOp::Lt => size < target,
            SizeOp::Le => size <= target,
            SizeOp::Eq => size == target,
            SizeOp::Ge => size >= target,
            SizeOp::Gt => size > target,
        };
        matched.then(|| PathBuf::from(self.folder_name(value)))
    }

    fn folder_name(&self, value: f64) -> String {
        self.template
            .replace("{operator}", &self.op.to_string())
            .replace("{value}", &format_value(value))
            .replace("{unit}", &self.unit.to_string())
    }
}

/// Whole-number thresholds print without a trailing ".0".
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
