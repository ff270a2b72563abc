mod csv;

pub(crate) use self::csv::{CsvFormat, append_entries, last_timestamp};
