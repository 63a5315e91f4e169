//! Title pruning
//!
//! Cleans a collected title list down to name-like entries: strips quotes and
//! stray punctuation, drops very short titles and anything with digits, then
//! deduplicates and sorts what is left.

use crate::types::PageTitle;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",$").unwrap());

static TRAILING_BANG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!$").unwrap());

/// A single character, or exactly two ASCII letters
static TOO_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:.|[a-zA-Z][a-zA-Z])$").unwrap());

static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());

static LEADING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\w\s]").unwrap());

static TRAILING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]$").unwrap());

/// Result of pruning a title list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Surviving titles, deduplicated and sorted
    pub kept: Vec<PageTitle>,
    /// Inputs rejected by a cleaning rule
    pub dropped: usize,
    /// Cleaned titles that collapsed into an earlier one
    pub duplicates: usize,
}

/// Clean one title, or `None` if it should be dropped
pub fn clean_title(title: &str) -> Option<String> {
    let unquoted = title.replace('"', "");
    let trimmed = unquoted.trim();
    let trimmed = TRAILING_COMMA.replace(trimmed, "");
    let trimmed = TRAILING_BANG.replace(&trimmed, "").into_owned();

    if TOO_SHORT.is_match(&trimmed) || HAS_DIGIT.is_match(&trimmed) {
        return None;
    }
    if LEADING_PUNCT.is_match(&trimmed) {
        return None;
    }

    let cleaned = TRAILING_PUNCT.replace(&trimmed, "");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.into_owned())
    }
}

/// Clean, deduplicate and sort a list of titles
pub fn prune_titles<I, S>(titles: I) -> PruneReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kept = BTreeSet::new();
    let mut report = PruneReport::default();

    for title in titles {
        match clean_title(title.as_ref()) {
            Some(cleaned) => {
                if !kept.insert(cleaned) {
                    report.duplicates += 1;
                }
            }
            None => report.dropped += 1,
        }
    }

    report.kept = kept.into_iter().collect();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("Aragorn", Some("Aragorn") ; "plain title")]
    #[test_case("  \"Bilbo Baggins\"  ", Some("Bilbo Baggins") ; "quotes and whitespace")]
    #[test_case("Frodo,", Some("Frodo") ; "trailing comma")]
    #[test_case("Gandalf!", Some("Gandalf") ; "trailing bang")]
    #[test_case("Gimli.", Some("Gimli") ; "trailing punctuation")]
    #[test_case("Gimli .", Some("Gimli ") ; "space before trailing punctuation kept")]
    #[test_case("Eärendil", Some("Eärendil") ; "unicode letters")]
    #[test_case("The Lord of the Rings", Some("The Lord of the Rings") ; "spaces kept")]
    #[test_case("X", None ; "single letter")]
    #[test_case("?", None ; "single symbol")]
    #[test_case("Ok", None ; "two letters")]
    #[test_case("Orc", Some("Orc") ; "three letters")]
    #[test_case("Third Age 3019", None ; "contains digits")]
    #[test_case("(disambiguation)", None ; "leading punctuation")]
    #[test_case("", None ; "empty")]
    #[test_case("   ", None ; "blank")]
    fn test_clean_title(input: &str, expected: Option<&str>) {
        assert_eq!(clean_title(input).as_deref(), expected);
    }

    #[test]
    fn test_prune_titles_sorts_and_dedupes() {
        let report = prune_titles([
            "Samwise",
            "Arwen",
            "\"Samwise\"",
            "1st Battle",
            "Boromir!",
            "Arwen",
        ]);

        assert_eq!(report.kept, vec!["Arwen", "Boromir", "Samwise"]);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.duplicates, 2);
    }

    #[test]
    fn test_prune_titles_empty() {
        let report = prune_titles(Vec::<String>::new());
        assert_eq!(report, PruneReport::default());
    }
}
