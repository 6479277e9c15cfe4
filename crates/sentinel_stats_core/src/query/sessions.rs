//! Reports over the sessions collection.

use mongodb::bson::{doc, Bson, Document};
use sentinel_stats_common::db::models::Session;

use super::{
    daily_buckets, end_time_or_now, field, one, rate_per_day, Accumulator, DayFormat, Pipeline,
    ReportOptions,
};

/// Length of a session in seconds, open sessions end at `now`.
fn duration(now: i64) -> Document {
    doc! {
        "$subtract": [
            end_time_or_now(Session::END_TIME, now),
            field(Session::START_TIME),
        ]
    }
}

/// Filter matching sessions which have not ended yet.
#[must_use]
pub fn active(options: &ReportOptions, now: i64) -> Document {
    let mut filter = Document::new();
    filter.insert(Session::END_TIME, Bson::Null);
    if let Some(window) = options.window.filter(Session::START_TIME, now) {
        filter.extend(window);
    }
    filter
}

/// Sessions started per day.
#[must_use]
pub fn daily_count(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        Session::START_TIME,
        DayFormat::YearFirst,
        options.window,
        now,
        one(),
        "sessionsCount",
        Accumulator::Sum,
    )
}

/// Sessions started per day, averaged over the whole recorded period.
#[must_use]
pub fn average_count(options: &ReportOptions, now: i64) -> Pipeline {
    rate_per_day(Session::START_TIME, options.window, now, "Average Sessions")
}

/// Bytes served by nodes per day.
#[must_use]
pub fn daily_data(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        Session::START_TIME,
        DayFormat::DayFirst,
        options.window,
        now,
        field(Session::SERVER_USAGE_DOWN),
        "dataCount",
        Accumulator::Sum,
    )
}

/// Bytes served by nodes in total.
#[must_use]
pub fn total_data(options: &ReportOptions, now: i64) -> Pipeline {
    Pipeline::new()
        .within(options.window, Session::START_TIME, now)
        .group(
            Bson::Null,
            doc! { "Total": { "$sum": field(Session::SERVER_USAGE_DOWN) } },
        )
}

/// Bytes served by nodes for sessions started during the last 24 hours.
#[must_use]
pub fn last_day_data(options: &ReportOptions, now: i64) -> Pipeline {
    total_data(&options.last_day(), now)
}

/// Total connected time per day in seconds.
#[must_use]
pub fn daily_duration(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        Session::START_TIME,
        DayFormat::DayFirst,
        options.window,
        now,
        duration(now),
        "durationCount",
        Accumulator::Sum,
    )
}

/// Average session length in seconds.
#[must_use]
pub fn average_duration(options: &ReportOptions, now: i64) -> Pipeline {
    Pipeline::new()
        .within(options.window, Session::START_TIME, now)
        .project(doc! { "duration": duration(now) })
        .group(Bson::Null, doc! { "Average": { "$avg": "$duration" } })
}

/// Average session length per day in seconds.
#[must_use]
pub fn daily_average_duration(options: &ReportOptions, now: i64) -> Pipeline {
    daily_buckets(
        Session::START_TIME,
        DayFormat::DayFirst,
        options.window,
        now,
        duration(now),
        "Average",
        Accumulator::Avg,
    )
}

/// Average length of sessions started during the last 24 hours.
#[must_use]
pub fn last_day_average_duration(options: &ReportOptions, now: i64) -> Pipeline {
    average_duration(&options.last_day(), now)
}
