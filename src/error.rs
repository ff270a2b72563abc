use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Write(#[from] WriteError),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("No config file found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error(
        "No config file found at {}. Copy {} to {} and fill in your data, then run again.",
        path.display(),
        example.display(),
        path.display()
    )]
    NotFoundWithExample { path: PathBuf, example: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing required setting \"{field}\"")]
    MissingField { field: &'static str },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid delimiter \"{input}\" (expected a single ASCII character)")]
    InvalidDelimiter { input: String },

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
}

#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("Failed to get login challenge from {url}: {source}")]
    Challenge { url: String, source: ureq::Error },

    #[error("Failed to send login response to {url}: {source}")]
    Response { url: String, source: ureq::Error },

    #[error("Malformed login response: {0}")]
    Malformed(String),

    #[error("Invalid PBKDF2 challenge \"{challenge}\"")]
    BadChallenge { challenge: String },

    #[error("Wrong username or password")]
    InvalidCredentials,
}

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("Failed to request event log from {url}: {source}")]
    Request { url: String, source: ureq::Error },

    #[error("Session rejected by the device: {reason}")]
    SessionRejected { reason: String },

    #[error("Failed to retrieve event log. Status code: {status}")]
    Status { status: u16 },

    #[error("Unparsable event log: {0}")]
    Unparsable(String),
}

#[derive(Debug, Error)]
pub(crate) enum WriteError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}
