use axum::extract::State;

use super::{
    aggregate_report, now, ApiResult, ErrorEnvelope, ReportEnvelope, ReportParams, ReportQuery,
};
use crate::{appstate::AppState, query::payments};

/// Paid SENTs per day
#[utoipa::path(
    get,
    tag = "payment",
    path = "/stats/payment/paid-sents-count",
    params(ReportQuery),
    responses(
        (status = 200, description = "Paid SENTs per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "sentsCount": 0}]})),
        (status = 400, description = "Unable to sum paid SENTs.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting daily paid sent count", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_paid_sents_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily paid SENTs");
    let pipeline = payments::daily_paid(&options, now());
    aggregate_report(
        appstate.daos.network_statistics.as_ref(),
        pipeline,
        "Error while getting daily paid sent count",
    )
    .await
}

/// Paid and unpaid SENTs per day, as shown on the average payment chart
#[utoipa::path(
    get,
    tag = "payment",
    path = "/stats/payment/average-paid-sents",
    params(ReportQuery),
    responses(
        (status = 200, description = "Paid and unpaid SENTs per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "sentsCount": 40}]})),
        (status = 400, description = "Unable to sum SENTs.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while average paid cents", "errors": "connection refused"}))
    )
)]
pub(crate) async fn average_paid_sents_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing average chart SENTs");
    let pipeline = payments::daily_average_paid(&options, now());
    aggregate_report(
        appstate.daos.network_statistics.as_ref(),
        pipeline,
        "Error while average paid cents",
    )
    .await
}

/// Paid and unpaid SENTs per day
#[utoipa::path(
    get,
    tag = "payment",
    path = "/stats/payment/total-sents-used",
    params(ReportQuery),
    responses(
        (status = 200, description = "Paid and unpaid SENTs per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "sentsCount": 40}]})),
        (status = 400, description = "Unable to sum SENTs.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting total sents used", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_total_sents_used(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily total SENTs");
    let pipeline = payments::daily_total_used(&options, now());
    aggregate_report(
        appstate.daos.network_statistics.as_ref(),
        pipeline,
        "Error while getting total sents used",
    )
    .await
}
