//! FRITZ!Box web interface client
//!
//! A `Session` owns the HTTP agent and the SID obtained from the login
//! handshake. It lives for one run and is handed to the log fetcher.

mod event_log;
mod login;

use std::time::Duration;

use ureq::Agent;

use crate::consts::{DATA_ROUTE, LOGIN_SID_ROUTE};

/// Authenticated session against one box
pub(crate) struct Session {
    agent: Agent,
    url: String,
    sid: String,
}

impl Session {
    pub(crate) fn sid(&self) -> &str {
        &self.sid
    }
}

pub(crate) fn new_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// `http://fritz.box/`, `http://fritz.box/data.lua` → `http://fritz.box`
fn base_url(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    trimmed
        .strip_suffix(DATA_ROUTE)
        .map(|s| s.trim_end_matches('/'))
        .unwrap_or(trimmed)
}

fn login_url(url: &str) -> String {
    format!("{}{}", base_url(url), LOGIN_SID_ROUTE)
}

fn data_url(url: &str) -> String {
    if url.contains(DATA_ROUTE) {
        url.to_string()
    } else if url.ends_with('/') {
        format!("{url}{DATA_ROUTE}")
    } else {
        format!("{url}/{DATA_ROUTE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_url_variants() {
        assert_eq!(
            login_url("http://fritz.box"),
            "http://fritz.box/login_sid.lua?version=2"
        );
        assert_eq!(
            login_url("http://fritz.box/"),
            "http://fritz.box/login_sid.lua?version=2"
        );
        assert_eq!(
            login_url("http://192.168.178.1/data.lua"),
            "http://192.168.178.1/login_sid.lua?version=2"
        );
    }

    #[test]
    fn data_url_variants() {
        assert_eq!(data_url("http://fritz.box"), "http://fritz.box/data.lua");
        assert_eq!(data_url("http://fritz.box/"), "http://fritz.box/data.lua");
        assert_eq!(
            data_url("http://fritz.box/data.lua"),
            "http://fritz.box/data.lua"
        );
    }
}
