mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod fritz;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use cli::Cli;
use utils::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match app::run(&cli) {
        Ok(summary) => {
            info!(
                fetched = summary.fetched,
                excluded = summary.excluded,
                written = summary.written,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
