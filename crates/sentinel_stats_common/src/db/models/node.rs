use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NodeVpn {
    pub status: String,
}

/// Node registration record.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Node {
    pub account_addr: String,
    pub joined_on: i64,
    pub created_at: i64,
    pub vpn: NodeVpn,
}

impl Node {
    pub const JOINED_ON: &'static str = "joined_on";
    pub const CREATED_AT: &'static str = "created_at";
    pub const VPN_STATUS: &'static str = "vpn.status";
    pub const STATUS_UP: &'static str = "up";

    #[must_use]
    pub fn new<S: Into<String>>(account_addr: S, joined_on: i64, status: &str) -> Self {
        Self {
            account_addr: account_addr.into(),
            joined_on,
            created_at: joined_on,
            vpn: NodeVpn {
                status: status.into(),
            },
        }
    }
}
