use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::consts::EXAMPLE_CONFIG_FILE;
use crate::core::ExcludeRule;
use crate::error::ConfigError;
use crate::utils::Timezone;

const DEFAULT_DELIMITER: u8 = b';';
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings file as written by the user, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    exclude: Vec<ExcludeRule>,
    #[serde(default)]
    logpath: Option<String>,
    #[serde(default)]
    case_sensitive: Option<bool>,
    #[serde(default)]
    incremental: Option<bool>,
    #[serde(default)]
    delimiter: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

/// Validated run configuration, immutable once loaded
#[derive(Clone)]
pub(crate) struct Config {
    pub(crate) url: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) exclude: Vec<ExcludeRule>,
    pub(crate) logpath: PathBuf,
    pub(crate) case_sensitive: bool,
    /// Only append entries newer than the last row already in the CSV
    pub(crate) incremental: bool,
    pub(crate) delimiter: u8,
    pub(crate) timezone: Timezone,
    pub(crate) timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("exclude", &self.exclude)
            .field("logpath", &self.logpath)
            .field("case_sensitive", &self.case_sensitive)
            .field("incremental", &self.incremental)
            .field("delimiter", &(self.delimiter as char))
            .field("timezone", &self.timezone)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let example = path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(EXAMPLE_CONFIG_FILE);
            if example.exists() {
                return Err(ConfigError::NotFoundWithExample {
                    path: path.to_path_buf(),
                    example,
                });
            }
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub(crate) fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        let url = required(raw.url, "url")?;
        let username = required(raw.username, "username")?;
        let password = required(raw.password, "password")?;
        let logpath = required(raw.logpath, "logpath")?;

        let delimiter = match raw.delimiter.as_deref() {
            None => DEFAULT_DELIMITER,
            Some(s) if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
            Some(s) => {
                return Err(ConfigError::InvalidDelimiter {
                    input: s.to_string(),
                });
            }
        };

        let timeout_secs = raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            url: url.trim().to_string(),
            username,
            password,
            exclude: raw.exclude,
            logpath: PathBuf::from(logpath),
            case_sensitive: raw.case_sensitive.unwrap_or(true),
            incremental: raw.incremental.unwrap_or(true),
            delimiter,
            timezone: Timezone::parse(raw.timezone.as_deref())?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
url = "http://fritz.box"
username = "admin"
password = "secret"
exclude = ["DHCP", ["WLAN", "abgemeldet"]]
logpath = "out.csv"
"#;

    fn parse(content: &str) -> Result<Config, ConfigError> {
        Config::parse(content, Path::new("settings.toml"))
    }

    #[test]
    fn parses_full_config_with_defaults() {
        let config = parse(FULL).unwrap();
        assert_eq!(config.url, "http://fritz.box");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.logpath, PathBuf::from("out.csv"));
        assert_eq!(
            config.exclude,
            vec![
                ExcludeRule::Keyword("DHCP".to_string()),
                ExcludeRule::AllOf(vec!["WLAN".to_string(), "abgemeldet".to_string()]),
            ]
        );
        assert!(config.case_sensitive);
        assert!(config.incremental);
        assert_eq!(config.delimiter, b';');
        assert!(matches!(config.timezone, Timezone::Local));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn exclude_defaults_to_empty() {
        let config = parse(
            r#"
url = "http://fritz.box"
username = "admin"
password = "secret"
logpath = "out.csv"
"#,
        )
        .unwrap();
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in ["url", "username", "password", "logpath"] {
            let content: String = FULL
                .lines()
                .filter(|line| !line.starts_with(&format!("{field} =")))
                .collect::<Vec<_>>()
                .join("\n");
            match parse(&content) {
                Err(ConfigError::MissingField { field: missing }) => assert_eq!(missing, field),
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn blank_required_field_is_missing() {
        let content = FULL.replace(r#"password = "secret""#, r#"password = "  ""#);
        assert!(matches!(
            parse(&content),
            Err(ConfigError::MissingField { field: "password" })
        ));
    }

    #[test]
    fn optional_fields_override_defaults() {
        let content = format!(
            "{FULL}case_sensitive = false\nincremental = false\ndelimiter = \",\"\ntimezone = \"Europe/Berlin\"\ntimeout_secs = 5\n"
        );
        let config = parse(&content).unwrap();
        assert!(!config.case_sensitive);
        assert!(!config.incremental);
        assert_eq!(config.delimiter, b',');
        assert!(matches!(
            config.timezone,
            Timezone::Named(chrono_tz::Europe::Berlin)
        ));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_multi_char_delimiter() {
        let content = format!("{FULL}delimiter = \";;\"\n");
        assert!(matches!(
            parse(&content),
            Err(ConfigError::InvalidDelimiter { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let content = format!("{FULL}timeout_secs = 0\n");
        assert!(matches!(parse(&content), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn rejects_invalid_timezone() {
        let content = format!("{FULL}timezone = \"Mars/Olympus\"\n");
        assert!(matches!(
            parse(&content),
            Err(ConfigError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            parse("url = \"http://fritz.box"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        let content = format!("{FULL}pasword = \"typo\"\n");
        assert!(matches!(parse(&content), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = parse(FULL).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn shipped_example_only_lacks_password() {
        let err = parse(include_str!("../ex_settings.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "password" }));

        let filled = include_str!("../ex_settings.toml")
            .replace(r#"password = """#, r#"password = "secret""#);
        let config = parse(&filled).unwrap();
        assert_eq!(config.exclude.len(), 2);
        assert_eq!(config.logpath, PathBuf::from("fritzLog.csv"));
    }

    #[test]
    fn load_missing_file_suggests_example() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EXAMPLE_CONFIG_FILE), FULL).unwrap();
        let err = Config::load(&dir.path().join("settings.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFoundWithExample { .. }));
    }

    #[test]
    fn load_missing_file_without_example() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("settings.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, FULL).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.username, "admin");
    }
}
