//! Session length reports. Durations are in seconds and open sessions count
//! up to the time of the request.

use axum::extract::State;

use super::{
    aggregate_report, now, ApiResult, ErrorEnvelope, ReportEnvelope, ReportParams, ReportQuery,
};
use crate::{appstate::AppState, query::sessions};

#[utoipa::path(
    get,
    tag = "time",
    path = "/stats/time/daily-stats",
    params(ReportQuery),
    responses(
        (status = 200, description = "Connected time per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "durationCount": 1200}]})),
        (status = 400, description = "Unable to sum session durations.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting time daily stats", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_duration_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily session durations");
    let pipeline = sessions::daily_duration(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting time daily stats",
    )
    .await
}

#[utoipa::path(
    get,
    tag = "time",
    path = "/stats/time/average-duration",
    params(ReportQuery),
    responses(
        (status = 200, description = "Average session length.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": null, "Average": 1129.1818181818182}]})),
        (status = 400, description = "Unable to average session durations.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting average duration", "errors": "connection refused"}))
    )
)]
pub(crate) async fn average_duration(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing average session duration");
    let pipeline = sessions::average_duration(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting average duration",
    )
    .await
}

#[utoipa::path(
    get,
    tag = "time",
    path = "/stats/time/average-daily",
    params(ReportQuery),
    responses(
        (status = 200, description = "Average session length per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "Average": 1129.1818181818182}]})),
        (status = 400, description = "Unable to average session durations.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting daily average duration", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_average_duration(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily average session duration");
    let pipeline = sessions::daily_average_duration(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting daily average duration",
    )
    .await
}

#[utoipa::path(
    get,
    tag = "time",
    path = "/stats/time/last-average",
    params(ReportQuery),
    responses(
        (status = 200, description = "Average length of sessions started in the last 24 hours.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": null, "Average": 845.5}]})),
        (status = 400, description = "Unable to average session durations.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting last average count", "errors": "connection refused"}))
    )
)]
pub(crate) async fn last_day_average_duration(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing last day average session duration");
    let pipeline = sessions::last_day_average_duration(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting last average count",
    )
    .await
}
