//! CLI definition and parsing.
//! Defines Args plus one subcommand per classification mode and provides
//! parse() for command-line handling.
//!
//! Notes:
//! - Common run options (source, dest, operation, duplicates, preview,
//!   logging) are global flags; the subcommand carries the rule payload.
//! - Rule assembly happens here: `to_rule()` turns raw flags into the
//!   immutable rule values and raises configuration errors before any
//!   file is touched.
//! - --debug is a shorthand for --log-level debug.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::DuplicatePolicy;
use crate::organize::Operation;
use crate::rules::{
    DEFAULT_NAME_TEMPLATE, DEFAULT_SIZE_TEMPLATE, DateGrouping, DatePredicate, DateRule,
    ExtensionRule, NamePosition, NameRule, SizeOp, SizeRule, SizeUnit, strftime_is_valid,
};

/// CLI wrapper for the filesort library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Sort files into folders by extension, size, date or name"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Source folder whose files will be organized.
    #[arg(long, short = 's', global = true, value_hint = ValueHint::DirPath, help = "Source folder to scan")]
    pub source: Option<PathBuf>,

    /// Destination base folder; rule folders are created under it.
    #[arg(long, short = 'd', global = true, value_hint = ValueHint::DirPath, help = "Destination base folder")]
    pub dest: Option<PathBuf>,

    /// Copy (default) or move matching files.
    #[arg(long, global = true, value_enum, help = "Copy or move matching files")]
    pub operation: Option<Operation>,

    /// What to do when a file already exists at the destination.
    #[arg(long, global = true, value_enum, help = "Handle duplicates: rename, overwrite or skip")]
    pub duplicates: Option<DuplicatePolicy>,

    /// Report would-be destinations without copying or moving anything.
    #[arg(long, global = true, help = "Dry run: report decisions, mutate nothing")]
    pub preview: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sort files into per-extension folders.
    Extension(ExtensionOpts),
    /// Sort files matching a size threshold.
    Size(SizeOpts),
    /// Sort files by creation date.
    Date(DateOpts),
    /// Sort files whose names match a search text.
    Name(NameOpts),
    /// Pull files out of nested folders into the destination.
    Flatten(FlattenOpts),
    /// Print the config file location used by filesort and exit.
    PrintConfig,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExtensionOpts {
    /// Comma-separated extensions to organize (e.g. "pdf,jpg").
    /// Omit to route every file to the base folder.
    #[arg(long, value_name = "EXTS")]
    pub types: Option<String>,

    /// Route non-matching extensions into a "Miscellaneous extension
    /// files" folder instead of excluding them.
    #[arg(long)]
    pub misc: bool,
}

impl ExtensionOpts {
    pub fn to_rule(&self) -> ExtensionRule {
        ExtensionRule::from_list(self.types.as_deref().unwrap_or(""), self.misc)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct SizeOpts {
    /// Comparison operator (default: lt).
    #[arg(long, value_enum, value_name = "OP")]
    pub operator: Option<SizeOp>,

    /// Threshold value in `--unit`s; omit to route every file to the base
    /// folder.
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub value: Option<f64>,

    /// Size unit (default: kb). Each unit is 1024x the previous.
    #[arg(long, value_enum, value_name = "UNIT")]
    pub unit: Option<SizeUnit>,

    /// Folder name template with {operator}/{value}/{unit} placeholders.
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,
}

impl SizeOpts {
    pub fn to_rule(&self) -> Result<SizeRule> {
        if let Some(v) = self.value
            && !(v.is_finite() && v >= 0.0)
        {
            bail!("size value must be a non-negative number, got {v}");
        }
        let template = self
            .template
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SIZE_TEMPLATE.to_string());
        Ok(SizeRule {
            op: self.operator.unwrap_or(SizeOp::Lt),
            value: self.value,
            unit: self.unit.unwrap_or_default(),
            template,
        })
    }
}

/// Destination folder grouping for the date rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupByArg {
    #[default]
    Single,
    Year,
    Month,
    Day,
    YearMonth,
    Custom,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DateOpts {
    /// Match files created on this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub on: Option<NaiveDate>,

    /// Match files created strictly after this date.
    #[arg(long, value_name = "DATE")]
    pub after: Option<NaiveDate>,

    /// Match files created strictly before this date.
    #[arg(long, value_name = "DATE")]
    pub before: Option<NaiveDate>,

    /// Start of an inclusive date range (needs --to).
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of an inclusive date range (needs --from).
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<NaiveDate>,

    /// Destination folder grouping (default: single).
    #[arg(long, value_enum, value_name = "GROUPING")]
    pub group_by: Option<GroupByArg>,

    /// Date format for `--group-by custom` (chrono strftime; default
    /// %Y-%m-%d).
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

impl DateOpts {
    pub fn to_rule(&self) -> Result<DateRule> {
        let predicate = match (self.on, self.after, self.before, self.from, self.to) {
            (Some(d), None, None, None, None) => DatePredicate::On(d),
            (None, Some(d), None, None, None) => DatePredicate::After(d),
            (None, None, Some(d), None, None) => DatePredicate::Before(d),
            (None, None, None, Some(from), Some(to)) => DatePredicate::Between(from, to),
            (None, None, None, None, None) => {
                bail!("a date criterion is required: --on, --after, --before, or --from/--to")
            }
            _ => bail!(
                "date criteria are mutually exclusive; pass exactly one of --on, --after, --before, or --from/--to"
            ),
        };

        let grouping = match self.group_by.unwrap_or_default() {
            GroupByArg::Single => DateGrouping::Single,
            GroupByArg::Year => DateGrouping::Year,
            GroupByArg::Month => DateGrouping::Month,
            GroupByArg::Day => DateGrouping::Day,
            GroupByArg::YearMonth => DateGrouping::YearMonth,
            GroupByArg::Custom => {
                let fmt = self
                    .format
                    .as_deref()
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .unwrap_or("%Y-%m-%d");
                if !strftime_is_valid(fmt) {
                    bail!("invalid date format '{fmt}'");
                }
                DateGrouping::Custom(fmt.to_string())
            }
        };

        Ok(DateRule { predicate, grouping })
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct NameOpts {
    /// Text to search for in file names (extension included).
    #[arg(long, value_name = "TEXT")]
    pub contains: String,

    /// Where the text must appear (default: anywhere).
    #[arg(long, value_enum, value_name = "POSITION")]
    pub position: Option<NamePosition>,

    /// Compare only this many characters of the search text (from the
    /// matching end). Only meaningful with starts-with/ends-with.
    #[arg(long, value_name = "N")]
    pub chars: Option<usize>,

    /// Folder name template; {text} is replaced by the search text.
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,
}

impl NameOpts {
    pub fn to_rule(&self) -> Result<NameRule> {
        let search = self.contains.trim().to_string();
        if search.is_empty() {
            bail!("search text must not be empty");
        }
        let template = self
            .template
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME_TEMPLATE.to_string());
        if template.trim().is_empty() {
            bail!("folder name template must not be empty");
        }
        Ok(NameRule {
            search,
            position: self.position.unwrap_or_default(),
            char_limit: self.chars,
            template,
        })
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct FlattenOpts {
    /// Comma-separated extensions to flatten; omit to flatten everything.
    #[arg(long, value_name = "EXTS")]
    pub types: Option<String>,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source_base = Some(src.clone());
        }
        if let Some(dest) = &self.dest {
            cfg.dest_base = Some(dest.clone());
        }
        if let Some(op) = self.operation {
            cfg.operation = op;
        }
        if let Some(policy) = self.duplicates {
            cfg.on_duplicate = policy;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.preview {
            cfg.preview = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
