use serde::{Deserialize, Serialize};

use super::Usage;

/// A single dVPN connection as written by the session collector.
///
/// `end_time` stays empty while the connection is open and is set once when
/// the client disconnects.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Session {
    pub session_name: String,
    pub client_addr: String,
    pub vpn_addr: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub usage: Usage,
    pub server_usage: Usage,
}

impl Session {
    pub const START_TIME: &'static str = "start_time";
    pub const END_TIME: &'static str = "end_time";
    pub const SERVER_USAGE_DOWN: &'static str = "server_usage.down";

    #[must_use]
    pub fn new<S: Into<String>>(session_name: S, start_time: i64, end_time: Option<i64>) -> Self {
        Self {
            session_name: session_name.into(),
            start_time,
            end_time,
            ..Default::default()
        }
    }
}
