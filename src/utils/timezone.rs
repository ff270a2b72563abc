use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::ConfigError;

/// Zone the device's wall-clock log times are interpreted in
#[derive(Debug, Clone, Copy, Default)]
pub(crate) enum Timezone {
    #[default]
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| ConfigError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// Seconds since the epoch for a wall-clock time in this zone.
    ///
    /// A time inside the repeated autumn hour resolves to its first
    /// occurrence, unless that lies before `floor` (an instant already seen
    /// earlier in the log), in which case the second occurrence is used.
    /// Times in the spring gap do not exist and yield `None`.
    pub(crate) fn to_unix(self, naive: NaiveDateTime, floor: Option<i64>) -> Option<i64> {
        match self {
            Timezone::Local => resolve(Local.from_local_datetime(&naive), floor),
            Timezone::Named(tz) => resolve(tz.from_local_datetime(&naive), floor),
        }
    }
}

fn resolve<T: TimeZone>(local: LocalResult<DateTime<T>>, floor: Option<i64>) -> Option<i64> {
    match local {
        LocalResult::Single(dt) => Some(dt.timestamp()),
        LocalResult::Ambiguous(first, second) => {
            if floor.is_some_and(|f| first.timestamp() < f) {
                Some(second.timestamp())
            } else {
                Some(first.timestamp())
            }
        }
        LocalResult::None => None,
    }
}
