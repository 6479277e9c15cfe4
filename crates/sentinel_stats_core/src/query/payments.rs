//! Reports over SENT payment snapshots.

use mongodb::bson::doc;
use sentinel_stats_common::db::models::NetworkStatistic;

use super::{daily_buckets, field, Accumulator, DayFormat, Pipeline, ReportOptions};

/// Paid SENTs per day.
#[must_use]
pub fn daily_paid(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        NetworkStatistic::TIMESTAMP,
        DayFormat::DayFirst,
        options.window,
        now,
        field(NetworkStatistic::PAID_COUNT),
        "sentsCount",
        Accumulator::Sum,
    )
}

/// Paid and unpaid SENTs per day.
#[must_use]
pub fn daily_total_used(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        NetworkStatistic::TIMESTAMP,
        DayFormat::DayFirst,
        options.window,
        now,
        doc! {
            "$add": [
                field(NetworkStatistic::PAID_COUNT),
                field(NetworkStatistic::UNPAID_COUNT),
            ]
        },
        "sentsCount",
        Accumulator::Sum,
    )
}

/// Served SENTs per day as published on the payment dashboard.
///
/// Clients read this as the daily average, yet each bucket holds the sum of
/// paid and unpaid counters, same as [`daily_total_used`].
#[must_use]
pub fn daily_average_paid(options: &ReportOptions, now: i64) -> Pipeline {
    daily_total_used(options, now)
}
