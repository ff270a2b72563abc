//! Event log retrieval from `data.lua`
//!
//! The web UI's log page is requested as an XHR, which returns JSON with the
//! entries under `data.log`. Older FRITZ!OS versions send each entry as an
//! array `[date, time, message, id, group, ...]`, newer ones as an object.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Session, data_url};
use crate::core::LogEntry;
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct LogResponse {
    data: LogData,
}

#[derive(Debug, Deserialize)]
struct LogData {
    log: Vec<RawLogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLogEntry {
    Row(Vec<Value>),
    Object {
        date: String,
        time: String,
        msg: String,
        #[serde(default)]
        id: Value,
        #[serde(default)]
        group: Value,
    },
}

/// Strings pass through, numbers are rendered, null and missing become `None`
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl RawLogEntry {
    fn into_entry(self, index: usize) -> Result<LogEntry, FetchError> {
        match self {
            RawLogEntry::Row(fields) => {
                let text = |i: usize| fields.get(i).and_then(Value::as_str);
                let (Some(date), Some(time), Some(message)) = (text(0), text(1), text(2)) else {
                    return Err(FetchError::Unparsable(format!(
                        "entry {index} lacks date, time or message"
                    )));
                };
                Ok(LogEntry {
                    date: date.to_string(),
                    time: time.to_string(),
                    message: message.to_string(),
                    code: fields.get(3).and_then(value_to_string),
                    category: fields.get(4).and_then(value_to_string),
                })
            }
            RawLogEntry::Object {
                date,
                time,
                msg,
                id,
                group,
            } => Ok(LogEntry {
                date,
                time,
                message: msg,
                code: value_to_string(&id),
                category: value_to_string(&group),
            }),
        }
    }
}

/// Parse a `data.lua` log page body, preserving the device's order
pub(crate) fn parse_log(body: &str) -> Result<Vec<LogEntry>, FetchError> {
    // An invalid SID gets the HTML login page instead of JSON
    if body.trim_start().starts_with('<') {
        return Err(FetchError::SessionRejected {
            reason: "login page returned instead of log data".to_string(),
        });
    }

    let response: LogResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Unparsable(e.to_string()))?;

    response
        .data
        .log
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_entry(index))
        .collect()
}

impl Session {
    pub(crate) fn fetch_log(&self) -> Result<Vec<LogEntry>, FetchError> {
        let url = data_url(&self.url);
        debug!(url = %url, "requesting event log");

        let result = self.agent.post(&url).send_form([
            ("xhr", "1"),
            ("sid", self.sid.as_str()),
            ("lang", "de"),
            ("page", "log"),
            ("xhrId", "log"),
        ]);
        let mut reply = match result {
            Ok(reply) => reply,
            Err(ureq::Error::StatusCode(status @ (401 | 403))) => {
                return Err(FetchError::SessionRejected {
                    reason: format!("HTTP {status}"),
                });
            }
            Err(ureq::Error::StatusCode(status)) => return Err(FetchError::Status { status }),
            Err(source) => return Err(FetchError::Request { url, source }),
        };

        let body = reply
            .body_mut()
            .read_to_string()
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;
        let entries = parse_log(&body)?;
        debug!(count = entries.len(), "event log received");
        Ok(entries)
    }
}
