//! Name rule: match the filename against a search text.

use clap::ValueEnum;
use std::path::PathBuf;

use super::record::FileRecord;

pub const DEFAULT_NAME_TEMPLATE: &str = "Files containing '{text}'";

/// Where the search text must appear in the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NamePosition {
    #[default]
    Anywhere,
    StartsWith,
    EndsWith,
}

#[derive(Debug, Clone)]
pub struct NameRule {
    /// Text searched for; the comparison is case-insensitive, the folder
    /// name keeps the original casing.
    pub search: String,
    pub position: NamePosition,
    /// For StartsWith/EndsWith: compare only this many characters of the
    /// search text, taken from the corresponding end. A limit beyond the
    /// text length uses the whole text; zero matches every file.
    pub char_limit: Option<usize>,
    /// Folder name template; {text} is replaced by the search text.
    pub template: String,
}

impl NameRule {
    /// The whole filename, extension included, takes part in the match.
    pub fn evaluate(&self, record: &FileRecord) -> Option<PathBuf> {
        if self.search.is_empty() || self.template.trim().is_empty() {
            return None;
        }
        let haystack = record.name.to_lowercase();
        let needle = self.search.to_lowercase();

        let matched = match self.position {
            NamePosition::Anywhere => haystack.contains(&needle),
            NamePosition::StartsWith => match self.char_limit {
                Some(n) => haystack.starts_with(head(&needle, n).as_str()),
                None => haystack.starts_with(&needle),
            },
            NamePosition::EndsWith => match self.char_limit {
                Some(n) => haystack.ends_with(tail(&needle, n).as_str()),
                None => haystack.ends_with(&needle),
            },
        };

        matched.then(|| PathBuf::from(self.template.replace("{text}", &self.search)))
    }
}

/// First `n` characters (not bytes) of `s`.
fn head(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Last `n` characters of `s`.
fn tail(s: &str, n: usize) -> String {
    let len = s.chars().count();
    s.chars().skip(len.saturating_sub(n)).collect()
}
