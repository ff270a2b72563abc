pub(crate) mod date;
pub(crate) mod logging;
pub(crate) mod timezone;

pub(crate) use date::parse_device_datetime;
pub(crate) use logging::{init_logging, short_sid};
pub(crate) use timezone::Timezone;
