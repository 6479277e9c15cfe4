use thiserror::Error;

use crate::{dao::DaoError, query::UnsupportedParam};

/// Represents kinds of error that occurred while answering a report
#[derive(Debug, Error)]
pub enum WebError {
    #[error("{message}: {source}")]
    Report {
        message: &'static str,
        source: DaoError,
    },
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        source: reqwest::Error,
    },
    #[error("Invalid query parameter: {0}")]
    BadRequest(String),
}

impl WebError {
    /// Human readable summary placed in the `message` field of the error envelope.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Report { message, .. } | Self::Upstream { message, .. } => message,
            Self::BadRequest(_) => "Invalid query parameter",
        }
    }

    /// Error detail placed in the `errors` field of the error envelope.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Report { source, .. } => source.to_string(),
            Self::Upstream { source, .. } => source.to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<UnsupportedParam> for WebError {
    fn from(error: UnsupportedParam) -> Self {
        Self::BadRequest(error.to_string())
    }
}
