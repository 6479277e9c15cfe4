//! Reports over node statistic snapshots and node registrations.

use mongodb::bson::Document;
use sentinel_stats_common::db::models::{Node, NodeStatistic};

use super::{
    daily_buckets, field, one, rate_per_day, Accumulator, DayFormat, Pipeline, ReportOptions,
};

/// Sum of sampled node totals per day.
#[must_use]
pub fn daily_total(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        NodeStatistic::TIMESTAMP,
        DayFormat::YearFirst,
        options.window,
        now,
        field(NodeStatistic::NODES_TOTAL),
        "nodesCount",
        Accumulator::Sum,
    )
}

/// Sum of sampled serving nodes per day.
#[must_use]
pub fn daily_active(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        NodeStatistic::TIMESTAMP,
        DayFormat::DayFirst,
        options.window,
        now,
        field(NodeStatistic::NODES_UP),
        "nodesCount",
        Accumulator::Sum,
    )
}

/// Node registrations per day, averaged over the whole recorded period.
#[must_use]
pub fn average_joined(options: &ReportOptions, now: i64) -> Pipeline {
    rate_per_day(Node::JOINED_ON, options.window, now, "Average")
}

/// New node registrations per day.
#[must_use]
pub fn daily_new(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        Node::CREATED_AT,
        DayFormat::DayFirst,
        options.window,
        now,
        one(),
        "nodesCount",
        Accumulator::Sum,
    )
}

/// Filter matching nodes currently serving VPN traffic.
#[must_use]
pub fn active(options: &ReportOptions, now: i64) -> Document {
    let mut filter = Document::new();
    filter.insert(Node::VPN_STATUS, Node::STATUS_UP);
    if let Some(window) = options.window.filter(Node::JOINED_ON, now) {
        filter.extend(window);
    }
    filter
}
