//! CLI argument definitions
//!
//! The tool runs without arguments from a scheduler; flags only override
//! where the settings live and how loud the run is.

use std::path::PathBuf;

use clap::Parser;

use crate::consts::DEFAULT_CONFIG_FILE;

#[derive(Debug, Parser)]
#[command(name = "fritzlog")]
#[command(
    about = "Download the FRITZ!Box event log, drop excluded messages and append the rest to a CSV file",
    version
)]
pub(crate) struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub(crate) config: PathBuf,

    /// Fetch and filter, but do not touch the CSV file
    #[arg(short = 'n', long)]
    pub(crate) dry_run: bool,

    /// Enable debug output (overridden by RUST_LOG)
    #[arg(long)]
    pub(crate) debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["fritzlog"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("settings.toml"));
        assert!(!cli.dry_run);
        assert!(!cli.debug);
    }

    #[test]
    fn flags_are_parsed() {
        let cli =
            Cli::try_parse_from(["fritzlog", "-c", "/etc/fritzlog.toml", "--dry-run", "--debug"])
                .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/fritzlog.toml"));
        assert!(cli.dry_run);
        assert!(cli.debug);
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["fritzlog", "extra"]).is_err());
    }
}
