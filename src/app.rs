use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::Config;
use crate::core::{filter_entries, select_newer};
use crate::error::AppError;
use crate::fritz::Session;
use crate::output::{CsvFormat, append_entries, last_timestamp};
use crate::utils::short_sid;

/// Counts reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) fetched: usize,
    pub(crate) excluded: usize,
    pub(crate) written: usize,
}

/// config → login → fetch → filter → select → append.
///
/// Every stage runs once; the first error aborts the run before the CSV is
/// opened, so a failed login or fetch leaves the output untouched.
pub(crate) fn run(cli: &Cli) -> Result<RunSummary, AppError> {
    let config = Config::load(&cli.config)?;
    debug!(?config, "configuration loaded");

    let session = Session::login(
        &config.url,
        &config.username,
        &config.password,
        config.timeout,
    )?;
    debug!(sid = %short_sid(session.sid()), "fetching event log");
    let entries = session.fetch_log()?;
    let fetched = entries.len();

    let entries = filter_entries(entries, &config.exclude, config.case_sensitive);
    let excluded = fetched - entries.len();

    let entries = if config.incremental {
        let last = last_timestamp(&config.logpath, config.delimiter);
        debug!(?last, "last stored timestamp");
        select_newer(entries, last, config.timezone)
    } else {
        entries
    };

    if cli.dry_run {
        info!(
            fetched,
            excluded,
            pending = entries.len(),
            "dry run, not writing {}",
            config.logpath.display()
        );
        return Ok(RunSummary {
            fetched,
            excluded,
            written: 0,
        });
    }

    let written = append_entries(
        &config.logpath,
        &entries,
        CsvFormat {
            delimiter: config.delimiter,
            timezone: config.timezone,
        },
    )?;

    Ok(RunSummary {
        fetched,
        excluded,
        written,
    })
}
