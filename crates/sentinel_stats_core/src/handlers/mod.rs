use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use mongodb::bson::{Bson, Document};
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

use crate::{
    dao::Dao,
    error::WebError,
    query::{Pipeline, ReportOptions, ResultFormat},
};

pub(crate) mod bandwidth;
pub(crate) mod duration;
pub(crate) mod nodes;
pub(crate) mod payments;
pub(crate) mod sessions;

/// Carries the service version on every response.
pub const VERSION_HEADER: &str = "x-sentinel-stats-version";

#[derive(Debug)]
pub struct ApiResponse {
    pub json: Value,
    pub status: StatusCode,
}

impl ApiResponse {
    #[must_use]
    pub fn new(json: Value, status: StatusCode) -> Self {
        Self { json, status }
    }

    /// Success envelope around result rows.
    #[must_use]
    pub fn results(rows: Vec<Document>) -> Self {
        let results = Bson::Array(rows.into_iter().map(Bson::Document).collect());
        Self::new(
            json!(ReportEnvelope {
                status: true,
                results: plain_json(results),
            }),
            StatusCode::OK,
        )
    }
}

/// Converts BSON to the JSON clients expect: object ids become hex strings
/// and dates RFC 3339 strings instead of their extended JSON wrappers.
fn plain_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(date) => match date.try_to_rfc3339_string() {
            Ok(date) => Value::String(date),
            Err(_) => Value::from(date.timestamp_millis()),
        },
        Bson::Array(values) => Value::Array(values.into_iter().map(plain_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, plain_json(value)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}

impl From<WebError> for ApiResponse {
    fn from(web_error: WebError) -> ApiResponse {
        error!("{web_error}");
        ApiResponse::new(
            json!(ErrorEnvelope {
                status: false,
                message: web_error.message().to_string(),
                errors: web_error.detail(),
            }),
            StatusCode::BAD_REQUEST,
        )
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let api_response = ApiResponse::from(self);
        api_response.into_response()
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut response = Json(self.json).into_response();
        *response.status_mut() = self.status;
        response
    }
}

pub type ApiResult = Result<ApiResponse, WebError>;

/// Successful report.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct ReportEnvelope {
    pub status: bool,
    #[schema(value_type = Vec<Object>)]
    pub results: Value,
}

/// Failed report.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub status: bool,
    pub message: String,
    pub errors: String,
}

/// Optional parameters accepted by every report.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `day` (default) or `current`.
    pub interval: Option<String>,
    /// `day` (default, all records) or `lastday` (last 24 hours).
    pub filter: Option<String>,
    /// `count` collapses point-lookup reports to a single count.
    pub format: Option<String>,
}

impl ReportQuery {
    pub fn options(&self) -> Result<ReportOptions, WebError> {
        Ok(ReportOptions::parse(
            self.interval.as_deref(),
            self.filter.as_deref(),
            self.format.as_deref(),
        )?)
    }
}

/// Validated report options taken from the query string.
///
/// Malformed query strings are rejected with the error envelope.
pub(crate) struct ReportParams(pub ReportOptions);

impl<S> FromRequestParts<S> for ReportParams
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ReportQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
        Ok(Self(query.options()?))
    }
}

/// Request time in epoch seconds, read once per request.
pub(crate) fn now() -> i64 {
    Utc::now().timestamp()
}

/// Runs `pipeline` and wraps the rows in the success envelope.
pub(crate) async fn aggregate_report(
    dao: &dyn Dao,
    pipeline: Pipeline,
    message: &'static str,
) -> ApiResult {
    let rows = dao
        .aggregate(pipeline)
        .await
        .map_err(|source| WebError::Report { message, source })?;
    Ok(ApiResponse::results(rows))
}

/// Runs a point lookup, optionally collapsing the documents to their count.
pub(crate) async fn find_report(
    dao: &dyn Dao,
    filter: Document,
    format: ResultFormat,
    message: &'static str,
) -> ApiResult {
    let rows = dao
        .find(filter)
        .await
        .map_err(|source| WebError::Report { message, source })?;
    Ok(match format {
        ResultFormat::Rows => ApiResponse::results(rows),
        ResultFormat::Count => ApiResponse::new(
            json!(ReportEnvelope {
                status: true,
                results: json!([{ "count": rows.len() }]),
            }),
            StatusCode::OK,
        ),
    })
}
