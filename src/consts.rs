/// Login endpoint of FRITZ!OS, version 2 enables PBKDF2 challenges
pub(crate) const LOGIN_SID_ROUTE: &str = "/login_sid.lua?version=2";

/// Endpoint serving the web UI's data pages, including the event log
pub(crate) const DATA_ROUTE: &str = "data.lua";

/// SID returned by the box when the login response was rejected
pub(crate) const INVALID_SID: &str = "0000000000000000";

/// Date and time layout of the device's event log: "16.10.26 10:00:00"
pub(crate) const DEVICE_DATETIME_FORMAT: &str = "%d.%m.%y %H:%M:%S";

pub(crate) const DEFAULT_CONFIG_FILE: &str = "settings.toml";
pub(crate) const EXAMPLE_CONFIG_FILE: &str = "ex_settings.toml";

/// Column order of the output CSV
pub(crate) const CSV_HEADER: [&str; 6] =
    ["timestamp", "date", "time", "message", "code", "category"];
