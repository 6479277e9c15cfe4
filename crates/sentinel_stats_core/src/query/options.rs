use std::str::FromStr;

use mongodb::bson::{doc, Document};
use sentinel_stats_common::SECONDS_PER_DAY;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported {param} value '{value}'")]
pub struct UnsupportedParam {
    pub param: &'static str,
    pub value: String,
}

impl UnsupportedParam {
    fn new(param: &'static str, value: &str) -> Self {
        Self {
            param,
            value: value.into(),
        }
    }
}

/// Bucket width requested with `interval`.
///
/// Reports bucket by calendar day; `current` is what existing clients send
/// to point-lookup reports and is accepted as-is.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Interval {
    #[default]
    Day,
    Current,
}

impl FromStr for Interval {
    type Err = UnsupportedParam;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "current" => Ok(Self::Current),
            _ => Err(UnsupportedParam::new("interval", value)),
        }
    }
}

/// Time range requested with `filter`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Window {
    #[default]
    All,
    /// `[now - 24h, now)`
    LastDay,
}

impl Window {
    /// `$match` filter selecting documents whose `field` lies inside the window.
    #[must_use]
    pub fn filter(self, field: &str, now: i64) -> Option<Document> {
        match self {
            Self::All => None,
            Self::LastDay => {
                let mut filter = Document::new();
                filter.insert(
                    field,
                    doc! { "$gte": now - SECONDS_PER_DAY, "$lt": now },
                );
                Some(filter)
            }
        }
    }
}

impl FromStr for Window {
    type Err = UnsupportedParam;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "day" | "all" => Ok(Self::All),
            "lastday" => Ok(Self::LastDay),
            _ => Err(UnsupportedParam::new("filter", value)),
        }
    }
}

/// Result shape requested with `format`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResultFormat {
    #[default]
    Rows,
    /// Point-lookup reports answer `[{"count": n}]` instead of documents.
    Count,
}

impl FromStr for ResultFormat {
    type Err = UnsupportedParam;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "rows" => Ok(Self::Rows),
            _ => Err(UnsupportedParam::new("format", value)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReportOptions {
    pub interval: Interval,
    pub window: Window,
    pub format: ResultFormat,
}

impl ReportOptions {
    /// Parses raw query parameters, missing ones fall back to defaults.
    pub fn parse(
        interval: Option<&str>,
        filter: Option<&str>,
        format: Option<&str>,
    ) -> Result<Self, UnsupportedParam> {
        Ok(Self {
            interval: interval.map(str::parse).transpose()?.unwrap_or_default(),
            window: filter.map(str::parse).transpose()?.unwrap_or_default(),
            format: format.map(str::parse).transpose()?.unwrap_or_default(),
        })
    }

    /// Same options restricted to the last-day window.
    #[must_use]
    pub fn last_day(self) -> Self {
        Self {
            window: Window::LastDay,
            ..self
        }
    }
}
