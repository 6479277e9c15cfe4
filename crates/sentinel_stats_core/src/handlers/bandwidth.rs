use axum::extract::State;

use super::{
    aggregate_report, now, ApiResult, ErrorEnvelope, ReportEnvelope, ReportParams, ReportQuery,
};
use crate::{appstate::AppState, query::sessions};

/// Bytes served by nodes per day
#[utoipa::path(
    get,
    tag = "data",
    path = "/stats/data/daily-stats",
    params(ReportQuery),
    responses(
        (status = 200, description = "Bytes served per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "dataCount": 812801312}]})),
        (status = 400, description = "Unable to sum served bytes.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting daily stats", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_data_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily data usage");
    let pipeline = sessions::daily_data(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting daily stats",
    )
    .await
}

/// Bytes served by nodes in total
#[utoipa::path(
    get,
    tag = "data",
    path = "/stats/data/total-data",
    params(ReportQuery),
    responses(
        (status = 200, description = "Total bytes served.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": null, "Total": 659363251082_i64}]})),
        (status = 400, description = "Unable to sum served bytes.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting total data count", "errors": "connection refused"}))
    )
)]
pub(crate) async fn total_data_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing total data usage");
    let pipeline = sessions::total_data(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting total data count",
    )
    .await
}

/// Bytes served by nodes for sessions started during the last 24 hours
#[utoipa::path(
    get,
    tag = "data",
    path = "/stats/data/last-data",
    params(ReportQuery),
    responses(
        (status = 200, description = "Bytes served in the last 24 hours.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": null, "Total": 9363251082_i64}]})),
        (status = 400, description = "Unable to sum served bytes.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting last data", "errors": "connection refused"}))
    )
)]
pub(crate) async fn last_day_data_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing last day data usage");
    let pipeline = sessions::last_day_data(&options, now());
    aggregate_report(
        appstate.daos.sessions.as_ref(),
        pipeline,
        "Error while getting last data",
    )
    .await
}
