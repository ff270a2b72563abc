use tracing_subscriber::EnvFilter;

/// Console logging to stderr. `RUST_LOG` wins over the `--debug` flag.
pub(crate) fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Leading part of a session id, safe to print in logs
pub(crate) fn short_sid(sid: &str) -> String {
    let head: String = sid.chars().take(4).collect();
    if sid.chars().count() > 4 {
        format!("{head}…")
    } else {
        head
    }
}
