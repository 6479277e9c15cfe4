use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use reqwest::{Client, Url};

use super::{
    aggregate_report, find_report, now, ApiResult, ErrorEnvelope, ReportEnvelope, ReportParams,
    ReportQuery,
};
use crate::{appstate::AppState, error::WebError, query::sessions};

const ACTIVE_COUNT_ERROR: &str = "Error while getting active session count";

/// Sessions started per day
#[utoipa::path(
    get,
    tag = "sessions",
    path = "/api/sessions/daily-stats",
    params(ReportQuery),
    responses(
        (status = 200, description = "Sessions started per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "2018/03/14", "sessionsCount": 8}]})),
        (status = 400, description = "Unable to count sessions.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting daily session count", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_session_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily session count");
    let pipeline = sessions::daily_count(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting daily session count",
    )
    .await
}

/// Sessions which have not ended yet
///
/// Relays the count from the configured upstream service when
/// `active_sessions_url` is set, otherwise looks up open sessions locally.
#[utoipa::path(
    get,
    tag = "sessions",
    path = "/api/sessions/active-count",
    params(ReportQuery),
    responses(
        (status = 200, description = "Open sessions, or their count with `format=count`.", body = ReportEnvelope, example = json!({"status": true, "results": [{"count": 12}]})),
        (status = 400, description = "Unable to look up open sessions.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting active session count", "errors": "connection refused"}))
    )
)]
pub(crate) async fn active_session_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> Result<Response, WebError> {
    if let Some(url) = &appstate.config.active_sessions_url {
        return relay(&appstate.http_client, url.clone()).await;
    }
    debug!("Looking up active sessions");
    let filter = sessions::active(&options, now());
    let response = find_report(
        appstate.daos.sessions.as_ref(),
        filter,
        options.format,
        ACTIVE_COUNT_ERROR,
    )
    .await?;
    Ok(response.into_response())
}

/// Fetches `url` and answers with its body unchanged.
async fn relay(client: &Client, url: Url) -> Result<Response, WebError> {
    debug!("Relaying active session count from {url}");
    let upstream = |source| WebError::Upstream {
        message: ACTIVE_COUNT_ERROR,
        source,
    };
    let body = client
        .get(url)
        .send()
        .await
        .map_err(upstream)?
        .bytes()
        .await
        .map_err(upstream)?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}

/// Sessions started per day, averaged over the recorded period
///
/// The average is `null` when all sessions started at the same second.
#[utoipa::path(
    get,
    tag = "sessions",
    path = "/api/sessions/average-count",
    params(ReportQuery),
    responses(
        (status = 200, description = "Average sessions per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"Average Sessions": 60.337374239990304}]})),
        (status = 400, description = "Unable to average sessions.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting average session count", "errors": "connection refused"}))
    )
)]
pub(crate) async fn average_session_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing average session count");
    let pipeline = sessions::average_count(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting average session count",
    )
    .await
}
