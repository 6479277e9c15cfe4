use serde::{Deserialize, Serialize};

/// Periodic sample of SENT token payments across the network.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NetworkStatistic {
    pub timestamp: i64,
    pub paid_count: i64,
    pub unpaid_count: i64,
}

impl NetworkStatistic {
    pub const TIMESTAMP: &'static str = "timestamp";
    pub const PAID_COUNT: &'static str = "paid_count";
    pub const UNPAID_COUNT: &'static str = "unpaid_count";

    #[must_use]
    pub fn new(timestamp: i64, paid_count: i64, unpaid_count: i64) -> Self {
        Self {
            timestamp,
            paid_count,
            unpaid_count,
        }
    }
}
