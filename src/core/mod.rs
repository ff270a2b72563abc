//! Core module - log entry model and the pure pipeline stages

mod filter;
mod incremental;
mod types;

pub(crate) use filter::filter_entries;
pub(crate) use incremental::select_newer;
pub(crate) use types::{ExcludeRule, LogEntry, chronological_timestamps};
