use axum::extract::State;

use super::{
    aggregate_report, find_report, now, ApiResult, ErrorEnvelope, ReportEnvelope, ReportParams,
    ReportQuery,
};
use crate::{appstate::AppState, query::nodes};

/// Sum of sampled node totals per day
#[utoipa::path(
    get,
    tag = "nodes",
    path = "/api/nodes/total-nodes",
    params(ReportQuery),
    responses(
        (status = 200, description = "Sampled node totals per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "2018/05/01", "nodesCount": 122}]})),
        (status = 400, description = "Unable to sum node totals.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting total number of nodes", "errors": "connection refused"}))
    )
)]
pub(crate) async fn total_node_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily node totals");
    let pipeline = nodes::daily_total(&options, now());
    aggregate_report(
        appstate.daos.node_statistics.as_ref(),
        pipeline,
        "Error while getting total number of nodes",
    )
    .await
}

/// Sum of sampled serving nodes per day
#[utoipa::path(
    get,
    tag = "nodes",
    path = "/stats/nodes/daily-active",
    params(ReportQuery),
    responses(
        (status = 200, description = "Sampled serving nodes per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "nodesCount": 20}]})),
        (status = 400, description = "Unable to sum serving nodes.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting active nodes", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_active_node_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily active nodes");
    let pipeline = nodes::daily_active(&options, now());
    aggregate_report(
        appstate.daos.node_statistics.as_ref(),
        pipeline,
        "Error while getting active nodes",
    )
    .await
}

/// Node registrations per day, averaged over the recorded period
#[utoipa::path(
    get,
    tag = "nodes",
    path = "/stats/nodes/average-nodes",
    params(ReportQuery),
    responses(
        (status = 200, description = "Average node registrations per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"Average": 1.1670445433958152}]})),
        (status = 400, description = "Unable to average node registrations.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting nodes", "errors": "connection refused"}))
    )
)]
pub(crate) async fn average_node_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing average node registrations");
    let pipeline = nodes::average_joined(&options, now());
    aggregate_report(
        appstate.daos.nodes.as_ref(),
        pipeline,
        "Error while getting nodes",
    )
    .await
}

/// New node registrations per day
#[utoipa::path(
    get,
    tag = "nodes",
    path = "/stats/nodes/daily-stats",
    params(ReportQuery),
    responses(
        (status = 200, description = "Node registrations per day.", body = ReportEnvelope, example = json!({"status": true, "results": [{"_id": "01/05/2018", "nodesCount": 4}]})),
        (status = 400, description = "Unable to count node registrations.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting daily nodes stats", "errors": "connection refused"}))
    )
)]
pub(crate) async fn daily_node_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Preparing daily node registrations");
    let pipeline = nodes::daily_new(&options, now());
    aggregate_report(
        appstate.daos.nodes.as_ref(),
        pipeline,
        "Error while getting daily nodes stats",
    )
    .await
}

/// Nodes currently serving VPN traffic
#[utoipa::path(
    get,
    tag = "nodes",
    path = "/stats/nodes/active-count",
    params(ReportQuery),
    responses(
        (status = 200, description = "Serving nodes, or their count with `format=count`.", body = ReportEnvelope, example = json!({"status": true, "results": [{"count": 18}]})),
        (status = 400, description = "Unable to look up serving nodes.", body = ErrorEnvelope, example = json!({"status": false, "message": "Error while getting active node count", "errors": "connection refused"}))
    )
)]
pub(crate) async fn active_node_count(
    State(appstate): State<AppState>,
    ReportParams(options): ReportParams,
) -> ApiResult {
    debug!("Looking up active nodes");
    let filter = nodes::active(&options, now());
    find_report(
        appstate.daos.nodes.as_ref(),
        filter,
        options.format,
        "Error while getting active node count",
    )
    .await
}
