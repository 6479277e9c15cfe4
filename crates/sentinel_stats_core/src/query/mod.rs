//! Aggregation pipelines behind every report.
//!
//! Builders are pure: they take the parsed request options and the request
//! time (`now`, epoch seconds) and return a [`Pipeline`] that MongoDB executes.
//! Capturing `now` once per request keeps the open-session end time and the
//! last-day window consistent within one pipeline.

use mongodb::bson::{doc, Bson, DateTime, Document};
use sentinel_stats_common::SECONDS_PER_DAY;

pub mod nodes;
mod options;
pub mod payments;
pub mod sessions;

pub use self::options::{Interval, ReportOptions, ResultFormat, UnsupportedParam, Window};

/// Group key format of daily buckets.
///
/// Reports keep the key format they were first published with since clients
/// use the key verbatim.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DayFormat {
    /// `YYYY/MM/DD`
    YearFirst,
    /// `DD/MM/YYYY`
    DayFirst,
}

impl DayFormat {
    /// Returns `$dateToString` format string for given variant
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::YearFirst => "%Y/%m/%d",
            Self::DayFirst => "%d/%m/%Y",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Accumulator {
    Sum,
    Avg,
}

impl Accumulator {
    fn operator(self) -> &'static str {
        match self {
            Self::Sum => "$sum",
            Self::Avg => "$avg",
        }
    }

    /// Accumulator expression applied to `value`.
    #[must_use]
    pub fn of(self, value: impl Into<Bson>) -> Document {
        let mut accumulator = Document::new();
        accumulator.insert(self.operator(), value.into());
        accumulator
    }
}

/// Single aggregation stage.
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    Project(Document),
    Match(Document),
    Group { id: Bson, fields: Document },
    Sort(Document),
}

impl Stage {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Project(_) => "$project",
            Self::Match(_) => "$match",
            Self::Group { .. } => "$group",
            Self::Sort(_) => "$sort",
        }
    }

    #[must_use]
    pub fn to_document(&self) -> Document {
        let body = match self {
            Self::Project(spec) | Self::Match(spec) | Self::Sort(spec) => spec.clone(),
            Self::Group { id, fields } => {
                let mut group = doc! { "_id": id.clone() };
                group.extend(fields.clone());
                group
            }
        };
        let mut stage = Document::new();
        stage.insert(self.name(), body);
        stage
    }
}

/// Ordered list of stages executed against one collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn project(mut self, spec: Document) -> Self {
        self.stages.push(Stage::Project(spec));
        self
    }

    #[must_use]
    pub fn matching(mut self, filter: Document) -> Self {
        self.stages.push(Stage::Match(filter));
        self
    }

    /// Adds a `$match` stage when `window` restricts the time range of `field`.
    #[must_use]
    pub fn within(self, window: Window, field: &str, now: i64) -> Self {
        match window.filter(field, now) {
            Some(filter) => self.matching(filter),
            None => self,
        }
    }

    #[must_use]
    pub fn group(mut self, id: impl Into<Bson>, fields: Document) -> Self {
        self.stages.push(Stage::Group {
            id: id.into(),
            fields,
        });
        self
    }

    /// Sorts buckets ascending by group key.
    #[must_use]
    pub fn sort_by_id(mut self) -> Self {
        self.stages.push(Stage::Sort(doc! { "_id": 1 }));
        self
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    #[must_use]
    pub fn to_documents(&self) -> Vec<Document> {
        self.stages.iter().map(Stage::to_document).collect()
    }

    #[must_use]
    pub fn into_documents(self) -> Vec<Document> {
        self.to_documents()
    }
}

/// `$field` reference for a document path.
#[must_use]
pub fn field(path: &str) -> String {
    format!("${path}")
}

/// Converts an epoch-seconds field into a BSON date.
#[must_use]
pub fn epoch_to_date(path: &str) -> Document {
    doc! {
        "$add": [
            DateTime::from_millis(0),
            { "$multiply": [field(path), 1000] },
        ]
    }
}

/// Calendar-day key (UTC) of the date held in `date`.
#[must_use]
pub fn day_key(format: DayFormat, date: &str) -> Document {
    doc! {
        "$dateToString": {
            "format": format.pattern(),
            "date": field(date),
        }
    }
}

/// Session end time, with `now` standing in for sessions that are still open.
#[must_use]
pub fn end_time_or_now(end_time: &str, now: i64) -> Document {
    doc! { "$ifNull": [field(end_time), now] }
}

/// Events per day between the earliest and latest timestamp of a group.
///
/// Yields `null` when all timestamps are equal, since the span is zero days.
#[must_use]
pub fn daily_rate(count: &str, oldest: &str, newest: &str) -> Document {
    doc! {
        "$let": {
            "vars": {
                "span": {
                    "$divide": [
                        { "$subtract": [field(newest), field(oldest)] },
                        SECONDS_PER_DAY,
                    ]
                }
            },
            "in": {
                "$cond": [
                    { "$eq": ["$$span", 0] },
                    Bson::Null,
                    { "$divide": [field(count), "$$span"] },
                ]
            }
        }
    }
}

/// Daily buckets over `time_field`: projects the bucket date and `value`,
/// groups by calendar day into `output` and sorts by key.
#[must_use]
pub fn daily_buckets(
    time_field: &str,
    format: DayFormat,
    window: Window,
    now: i64,
    value: impl Into<Bson>,
    output: &str,
    accumulator: Accumulator,
) -> Pipeline {
    let mut fields = Document::new();
    fields.insert(output, accumulator.of(field("value")));
    Pipeline::new()
        .within(window, time_field, now)
        .project(doc! {
            "date": epoch_to_date(time_field),
            "value": value.into(),
        })
        .group(day_key(format, "date"), fields)
        .sort_by_id()
}

/// One row holding `output`, the events per day over `time_field`.
#[must_use]
pub fn rate_per_day(time_field: &str, window: Window, now: i64, output: &str) -> Pipeline {
    let mut projection = doc! { "_id": 0 };
    projection.insert(output, daily_rate("count", "oldest", "newest"));
    Pipeline::new()
        .within(window, time_field, now)
        .group(
            Bson::Null,
            doc! {
                "oldest": { "$min": field(time_field) },
                "newest": { "$max": field(time_field) },
                "count": { "$sum": 1 },
            },
        )
        .project(projection)
}

/// Constant `1` for counting documents through a projected value.
#[must_use]
pub fn one() -> Document {
    doc! { "$literal": 1 }
}
