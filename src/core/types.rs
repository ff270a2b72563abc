//! Event log data types
//!
//! `LogEntry` is what the fetcher produces and the CSV writer persists.

use serde::Deserialize;

use crate::utils::{Timezone, parse_device_datetime};

/// One row of the device's event log
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct LogEntry {
    /// Device date, "dd.mm.yy"
    pub(crate) date: String,
    /// Device time, "HH:MM:SS"
    pub(crate) time: String,
    pub(crate) message: String,
    /// Message id assigned by FRITZ!OS
    pub(crate) code: Option<String>,
    /// Message group (system, internet, telephony, wlan, usb, ...)
    pub(crate) category: Option<String>,
}

impl LogEntry {
    #[cfg(test)]
    pub(crate) fn new(date: &str, time: &str, message: &str) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            message: message.to_string(),
            code: None,
            category: None,
        }
    }

    /// Human-readable timestamp as shown in the web UI
    pub(crate) fn timestamp(&self) -> String {
        format!("{} {}", self.date, self.time)
    }

    /// Unix seconds of this entry; `floor` disambiguates the repeated DST hour
    pub(crate) fn unix_timestamp(&self, timezone: Timezone, floor: Option<i64>) -> Option<i64> {
        parse_device_datetime(&self.date, &self.time).and_then(|dt| timezone.to_unix(dt, floor))
    }
}

/// Unix timestamps for entries listed oldest first.
///
/// Each entry is resolved against the latest instant seen before it, so the
/// second pass through a repeated DST hour sorts after the first.
pub(crate) fn chronological_timestamps(
    entries: &[LogEntry],
    timezone: Timezone,
) -> Vec<Option<i64>> {
    let mut floor = None;
    entries
        .iter()
        .map(|entry| {
            let ts = entry.unix_timestamp(timezone, floor);
            floor = floor.max(ts);
            ts
        })
        .collect()
}

/// Exclusion rule from the `exclude` setting.
///
/// A plain string drops messages containing it; a list drops messages
/// containing every one of its parts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExcludeRule {
    Keyword(String),
    AllOf(Vec<String>),
}
