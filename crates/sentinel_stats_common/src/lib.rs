pub mod config;
pub mod db;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds in a calendar day, used for rate spans and the last-day window.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
