//! Exclusion filter
//!
//! Pure and order-preserving: an entry is dropped when its message matches
//! any configured rule.

use crate::core::types::{ExcludeRule, LogEntry};

fn contains(message: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        message.contains(needle)
    } else {
        message.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl ExcludeRule {
    fn matches(&self, message: &str, case_sensitive: bool) -> bool {
        match self {
            ExcludeRule::Keyword(keyword) => contains(message, keyword, case_sensitive),
            // An empty list would otherwise match everything
            ExcludeRule::AllOf(parts) => {
                !parts.is_empty() && parts.iter().all(|p| contains(message, p, case_sensitive))
            }
        }
    }
}

pub(crate) fn is_excluded(message: &str, rules: &[ExcludeRule], case_sensitive: bool) -> bool {
    rules.iter().any(|rule| rule.matches(message, case_sensitive))
}

pub(crate) fn filter_entries(
    entries: Vec<LogEntry>,
    rules: &[ExcludeRule],
    case_sensitive: bool,
) -> Vec<LogEntry> {
    entries
        .into_iter()
        .filter(|entry| !is_excluded(&entry.message, rules, case_sensitive))
        .collect()
}
