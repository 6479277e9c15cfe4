use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NodeCounts {
    pub up: i64,
    pub total: i64,
}

/// Periodic sample of how many nodes are registered and how many of them serve traffic.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NodeStatistic {
    pub timestamp: i64,
    pub nodes: NodeCounts,
}

impl NodeStatistic {
    pub const TIMESTAMP: &'static str = "timestamp";
    pub const NODES_UP: &'static str = "nodes.up";
    pub const NODES_TOTAL: &'static str = "nodes.total";

    #[must_use]
    pub fn new(timestamp: i64, up: i64, total: i64) -> Self {
        Self {
            timestamp,
            nodes: NodeCounts { up, total },
        }
    }
}
