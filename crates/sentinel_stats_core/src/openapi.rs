use utoipa::OpenApi;

use super::handlers::{bandwidth, duration, nodes, payments, sessions, ErrorEnvelope, ReportEnvelope};

#[derive(OpenApi)]
#[openapi(
    info(title = "Sentinel statistics"),
    paths(
        // /api/sessions
        sessions::daily_session_count,
        sessions::active_session_count,
        sessions::average_session_count,
        // /api/nodes
        nodes::total_node_count,
        // /stats/nodes
        nodes::daily_active_node_count,
        nodes::average_node_count,
        nodes::daily_node_count,
        nodes::active_node_count,
        // /stats/data
        bandwidth::daily_data_count,
        bandwidth::total_data_count,
        bandwidth::last_day_data_count,
        // /stats/time
        duration::daily_duration_count,
        duration::average_duration,
        duration::daily_average_duration,
        duration::last_day_average_duration,
        // /stats/payment
        payments::daily_paid_sents_count,
        payments::average_paid_sents_count,
        payments::daily_total_sents_used,
    ),
    components(schemas(ReportEnvelope, ErrorEnvelope)),
    tags(
        (name = "sessions", description = "VPN session counts"),
        (name = "nodes", description = "Node counts and registrations"),
        (name = "data", description = "Bandwidth served by nodes"),
        (name = "time", description = "Session durations"),
        (name = "payment", description = "SENT token payments"),
    )
)]
pub struct ApiDoc;
