//! Date rule: match files by creation date and group them into folders.
//!
//! Comparisons use date-only granularity; the time of day never matters.
//! Reference dates arrive already parsed — unparsable input is rejected at
//! configuration time, before any traversal starts.

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use std::path::PathBuf;

use super::record::FileRecord;

/// Which creation dates match, with the reference date(s) inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePredicate {
    /// Created exactly on this date.
    On(NaiveDate),
    /// Created strictly after this date.
    After(NaiveDate),
    /// Created strictly before this date.
    Before(NaiveDate),
    /// Created within this inclusive range.
    Between(NaiveDate, NaiveDate),
}

impl DatePredicate {
    pub fn matches(&self, created: NaiveDate) -> bool {
        match *self {
            DatePredicate::On(d) => created == d,
            DatePredicate::After(d) => created > d,
            DatePredicate::Before(d) => created < d,
            DatePredicate::Between(from, to) => from <= created && created <= to,
        }
    }

    /// Descriptive folder name used by the Single grouping.
    fn single_folder_name(&self) -> String {
        match *self {
            DatePredicate::On(d) => format!("Created on {d}"),
            DatePredicate::After(d) => format!("Created after {d}"),
            DatePredicate::Before(d) => format!("Created before {d}"),
            DatePredicate::Between(from, to) => {
                format!("Created between {from} and {to}")
            }
        }
    }
}

/// How matched files are grouped into destination folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateGrouping {
    /// One fixed folder named after the predicate.
    Single,
    /// Creation year, "%Y".
    Year,
    /// "%Y-%m". Month and YearMonth are deliberately the same folder.
    Month,
    /// Full date, "%Y-%m-%d".
    Day,
    /// Alias of Month.
    YearMonth,
    /// Free-form chrono format applied to the full creation timestamp.
    Custom(String),
}

#[derive(Debug, Clone)]
pub struct DateRule {
    pub predicate: DatePredicate,
    pub grouping: DateGrouping,
}

impl DateRule {
    pub fn evaluate(&self, record: &FileRecord) -> Option<PathBuf> {
        let created = record.created_date();
        if !self.predicate.matches(created) {
            return None;
        }
        let folder = match &self.grouping {
            DateGrouping::Single => self.predicate.single_folder_name(),
            DateGrouping::Year => created.format("%Y").to_string(),
            DateGrouping::Month | DateGrouping::YearMonth => {
                created.format("%Y-%m").to_string()
            }
            DateGrouping::Day => created.format("%Y-%m-%d").to_string(),
            DateGrouping::Custom(fmt) => {
                // An invalid specifier would make the formatter panic when
                // displayed; configuration validates up front, but direct
                // library callers get a no-match instead of a panic.
                if !strftime_is_valid(fmt) {
                    return None;
                }
                record.created.format(fmt).to_string()
            }
        };
        Some(PathBuf::from(folder))
    }
}

/// True when every item of the strftime string parses.
pub fn strftime_is_valid(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}
