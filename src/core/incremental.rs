//! Incremental selection against the CSV's high-water mark
//!
//! The box reports its log newest first and always returns the whole
//! buffer, so a scheduled run would re-append everything it already wrote.
//! Keeping only entries strictly newer than the last stored timestamp makes
//! repeated runs append just the delta.

use tracing::debug;

use crate::core::types::{LogEntry, chronological_timestamps};
use crate::utils::Timezone;

/// Entries newer than `last_timestamp`, oldest first.
///
/// Without a stored timestamp every entry is kept. Entries whose date cannot
/// be parsed are kept only in that case, since they cannot be compared.
pub(crate) fn select_newer(
    entries: Vec<LogEntry>,
    last_timestamp: Option<i64>,
    timezone: Timezone,
) -> Vec<LogEntry> {
    let mut oldest_first = entries;
    oldest_first.reverse();
    let stamps = chronological_timestamps(&oldest_first, timezone);

    let mut stamped: Vec<(Option<i64>, LogEntry)> = stamps
        .into_iter()
        .zip(oldest_first)
        .filter(|(ts, entry)| match (last_timestamp, ts) {
            (None, _) => true,
            (Some(last), Some(ts)) => *ts > last,
            (Some(_), None) => {
                debug!(at = %entry.timestamp(), "skipping entry with unparsable date");
                false
            }
        })
        .collect();

    stamped.sort_by_key(|(ts, _)| *ts);
    stamped.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTC: Timezone = Timezone::Named(chrono_tz::UTC);

    fn entry(time: &str, message: &str) -> LogEntry {
        LogEntry::new("01.01.70", time, message)
    }

    #[test]
    fn without_mark_reverses_newest_first_log() {
        let input = vec![
            entry("00:00:30", "third"),
            entry("00:00:20", "second"),
            entry("00:00:10", "first"),
        ];
        let out = select_newer(input, None, UTC);
        let messages: Vec<_> = out.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn keeps_only_strictly_newer() {
        let input = vec![
            entry("00:00:30", "third"),
            entry("00:00:20", "second"),
            entry("00:00:10", "first"),
        ];
        let out = select_newer(input, Some(20), UTC);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "third");
    }

    #[test]
    fn equal_timestamps_keep_chronological_order() {
        let input = vec![entry("00:00:10", "later"), entry("00:00:10", "earlier")];
        let out = select_newer(input, None, UTC);
        assert_eq!(out[0].message, "earlier");
        assert_eq!(out[1].message, "later");
    }

    #[test]
    fn unparsable_dates_dropped_when_mark_exists() {
        let input = vec![entry("00:00:30", "ok"), LogEntry::new("??", "??", "bad")];
        assert_eq!(select_newer(input.clone(), None, UTC).len(), 2);
        let out = select_newer(input, Some(0), UTC);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "ok");
    }

    #[test]
    fn second_pass_of_repeated_hour_is_newer() {
        let berlin = Timezone::parse(Some("Europe/Berlin")).unwrap();
        let mark = LogEntry::new("25.10.26", "02:50:00", "first pass")
            .unix_timestamp(berlin, None);
        // Newest first, as the box lists them
        let input = vec![
            LogEntry::new("25.10.26", "02:10:00", "second pass"),
            LogEntry::new("25.10.26", "02:50:00", "first pass"),
        ];
        let out = select_newer(input, mark, berlin);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "second pass");
    }

    #[test]
    fn nothing_new() {
        let input = vec![entry("00:00:10", "first")];
        assert!(select_newer(input, Some(10), UTC).is_empty());
    }
}
