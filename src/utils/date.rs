use chrono::NaiveDateTime;

use crate::consts::DEVICE_DATETIME_FORMAT;

/// Parse the device's "dd.mm.yy" date and "HH:MM:SS" time columns
pub(crate) fn parse_device_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let joined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&joined, DEVICE_DATETIME_FORMAT).ok()
}
