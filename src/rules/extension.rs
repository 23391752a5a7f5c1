//! Extension rule: route files into per-extension folders.

use std::collections::BTreeSet;
use std::path::PathBuf;

use super::record::FileRecord;

/// Bucket for extensions outside the accepted set when the fallback is on.
pub const MISC_FOLDER_NAME: &str = "Miscellaneous extension files";

#[derive(Debug, Clone, Default)]
pub struct ExtensionRule {
    /// Accepted extensions, lowercased and dotless. Empty means "accept
    /// everything into the base folder".
    pub extensions: BTreeSet<String>,
    /// Route non-matching files into [`MISC_FOLDER_NAME`] instead of
    /// excluding them.
    pub misc_fallback: bool,
}

impl ExtensionRule {
    /// Build from a comma-separated user list ("pdf, .JPG,txt").
    /// Entries are trimmed, stripped of a leading dot, and lowercased;
    /// empty entries are dropped.
    pub fn from_list(list: &str, misc_fallback: bool) -> Self {
        let extensions = list
            .split(',')
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            extensions,
            misc_fallback,
        }
    }

    pub fn evaluate(&self, record: &FileRecord) -> Option<PathBuf> {
        if self.extensions.is_empty() {
            return Some(PathBuf::new());
        }
        match record.extension.as_deref() {
            Some(ext) if self.extensions.contains(ext) => {
                Some(PathBuf::from(format!("{ext} files")))
            }
            // A file without an extension can only land in the misc bucket.
            _ if self.misc_fallback => Some(PathBuf::from(MISC_FOLDER_NAME)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::Path;

    fn record(name: &str) -> FileRecord {
        FileRecord {
            path: Path::new("/src").join(name),
            name: name.to_string(),
            extension: Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase()),
            size: 1,
            created: Local.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn accepted_extension_routes_to_ext_folder() {
        let rule = ExtensionRule::from_list("txt", true);
        assert_eq!(
            rule.evaluate(&record("notes.txt")),
            Some(PathBuf::from("txt files"))
        );
    }

    #[test]
    fn other_extension_routes_to_misc_when_enabled() {
        let rule = ExtensionRule::from_list("txt", true);
        assert_eq!(
            rule.evaluate(&record("image.bin")),
            Some(PathBuf::from(MISC_FOLDER_NAME))
        );
    }

    #[test]
    fn other_extension_excluded_when_misc_disabled() {
        let rule = ExtensionRule::from_list("txt", false);
        assert_eq!(rule.evaluate(&record("image.bin")), None);
    }

    #[test]
    fn empty_set_routes_everything_to_base() {
        let rule = ExtensionRule::from_list("", true);
        assert_eq!(rule.evaluate(&record("anything.xyz")), Some(PathBuf::new()));
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let rule = ExtensionRule::from_list(" .PDF , Txt", false);
        assert_eq!(
            rule.evaluate(&record("Report.PDF")),
            Some(PathBuf::from("pdf files"))
        );
    }

    #[test]
    fn extensionless_file_goes_to_misc_only() {
        let with_misc = ExtensionRule::from_list("txt", true);
        assert_eq!(
            with_misc.evaluate(&record("Makefile")),
            Some(PathBuf::from(MISC_FOLDER_NAME))
        );
        let without_misc = ExtensionRule::from_list("txt", false);
        assert_eq!(without_misc.evaluate(&record("Makefile")), None);
    }
}
