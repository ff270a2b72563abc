//! Append-only CSV output
//!
//! Rows are only ever appended. A header is written when the file is new or
//! empty, so the first scheduled run creates a self-describing file.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::CSV_HEADER;
use crate::core::{LogEntry, chronological_timestamps};
use crate::error::WriteError;
use crate::utils::Timezone;

#[derive(Debug, Clone, Copy)]
pub(crate) struct CsvFormat {
    pub(crate) delimiter: u8,
    /// Zone used to derive the `timestamp` column from the device time
    pub(crate) timezone: Timezone,
}

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    timestamp: Option<i64>,
    date: String,
    time: String,
    message: String,
    code: Option<String>,
    category: Option<String>,
}

impl CsvRow {
    fn new(entry: &LogEntry, timestamp: Option<i64>) -> Self {
        Self {
            timestamp,
            date: entry.date.clone(),
            time: entry.time.clone(),
            message: entry.message.clone(),
            code: entry.code.clone(),
            category: entry.category.clone(),
        }
    }
}

/// Append `entries` to `path`, creating it with a header if needed.
/// Entries are expected oldest first. Returns the number of rows written.
pub(crate) fn append_entries(
    path: &Path,
    entries: &[LogEntry],
    format: CsvFormat,
) -> Result<usize, WriteError> {
    let open_err = |source| WriteError::Open {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;
    let len = file.metadata().map_err(open_err)?.len();
    let needs_header = len == 0;

    // A last row without terminator would swallow the first new row
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).map_err(open_err)?;
        file.read_exact(&mut last).map_err(open_err)?;
        if last[0] != b'\n' {
            debug!(path = %path.display(), "terminating unfinished last row");
            file.write_all(b"\n").map_err(open_err)?;
        }
    }

    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(false)
        .from_writer(file);

    if needs_header {
        debug!(path = %path.display(), "writing CSV header");
        writer.write_record(CSV_HEADER).map_err(csv_err)?;
    }
    let stamps = chronological_timestamps(entries, format.timezone);
    for (entry, timestamp) in entries.iter().zip(stamps) {
        writer
            .serialize(CsvRow::new(entry, timestamp))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| csv_err(e.into()))?;

    Ok(entries.len())
}

/// Highest value in the first column of an existing CSV.
///
/// Missing, empty or foreign files yield `None`; rows whose first column is
/// not an integer are skipped.
pub(crate) fn last_timestamp(path: &Path, delimiter: u8) -> Option<i64> {
    let file = File::open(path).ok()?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    reader
        .records()
        .filter_map(Result::ok)
        .filter_map(|record| record.get(0)?.trim().parse::<i64>().ok())
        .max()
}

/// Read the rows of a CSV written by [`append_entries`] back into entries
#[cfg(test)]
pub(crate) fn read_entries(path: &Path, delimiter: u8) -> Result<Vec<LogEntry>, WriteError> {
    let file = File::open(path).map_err(|source| WriteError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(file);

    reader
        .deserialize::<CsvRow>()
        .map(|row| {
            let row = row.map_err(|source| WriteError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(LogEntry {
                date: row.date,
                time: row.time,
                message: row.message,
                code: row.code,
                category: row.category,
            })
        })
        .collect()
}
