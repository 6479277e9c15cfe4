use serde::{Deserialize, Serialize};

pub mod network_statistic;
pub mod node;
pub mod node_statistic;
pub mod session;

pub use self::{
    network_statistic::NetworkStatistic, node::Node, node_statistic::NodeStatistic,
    session::Session,
};

/// Byte counters reported for one side of a connection.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Usage {
    pub down: i64,
    pub up: i64,
}
