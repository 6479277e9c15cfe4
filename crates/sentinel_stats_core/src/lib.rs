use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::anyhow;
use axum::{
    extract::State,
    http::{header::HeaderName, HeaderValue, Method, Request},
    routing::get,
    serve, Json, Router,
};
use sentinel_stats_common::{config::StatsConfig, VERSION};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    appstate::AppState,
    dao::Daos,
    handlers::{
        bandwidth::{daily_data_count, last_day_data_count, total_data_count},
        duration::{
            average_duration, daily_average_duration, daily_duration_count,
            last_day_average_duration,
        },
        nodes::{
            active_node_count, average_node_count, daily_active_node_count, daily_node_count,
            total_node_count,
        },
        payments::{average_paid_sents_count, daily_paid_sents_count, daily_total_sents_used},
        sessions::{active_session_count, average_session_count, daily_session_count},
        VERSION_HEADER,
    },
};

#[macro_use]
extern crate tracing;

#[macro_use]
extern crate serde;

pub mod appstate;
pub mod dao;
pub mod error;
pub mod handlers;
mod openapi;
pub mod query;

const SECURITY_HEADERS: [(&str, &str); 4] = [
    ("x-frame-options", "SAMEORIGIN"),
    ("x-xss-protection", "0"),
    ("x-content-type-options", "nosniff"),
    ("x-download-options", "noopen"),
];

/// Simple health-check.
async fn health_check() -> &'static str {
    "alive"
}

/// Reports that the service is up along with where it listens.
async fn status(State(appstate): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "Running",
        "port": appstate.config.http_port,
        "env": appstate.config.environment,
    }))
}

fn cors_layer(config: &StatsConfig) -> CorsLayer {
    let origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::any(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
}

pub fn build_webapp(config: StatsConfig, daos: Daos, http_client: reqwest::Client) -> Router {
    let cors = cors_layer(&config);
    let webapp: Router<AppState> = Router::new()
        .route("/", get(status))
        .route("/api/health", get(health_check))
        // /api
        .route("/api/sessions/daily-stats", get(daily_session_count))
        .route("/api/sessions/active-count", get(active_session_count))
        .route("/api/sessions/average-count", get(average_session_count))
        .route("/api/nodes/total-nodes", get(total_node_count))
        // /stats/nodes
        .route("/stats/nodes/daily-active", get(daily_active_node_count))
        .route("/stats/nodes/average-nodes", get(average_node_count))
        .route("/stats/nodes/daily-stats", get(daily_node_count))
        .route("/stats/nodes/active-count", get(active_node_count))
        // /stats/data
        .route("/stats/data/daily-stats", get(daily_data_count))
        .route("/stats/data/total-data", get(total_data_count))
        .route("/stats/data/last-data", get(last_day_data_count))
        // /stats/time
        .route("/stats/time/daily-stats", get(daily_duration_count))
        .route("/stats/time/average-duration", get(average_duration))
        .route("/stats/time/average-daily", get(daily_average_duration))
        .route("/stats/time/last-average", get(last_day_average_duration))
        // /stats/payment
        .route("/stats/payment/paid-sents-count", get(daily_paid_sents_count))
        .route(
            "/stats/payment/average-paid-sents",
            get(average_paid_sents_count),
        )
        .route(
            "/stats/payment/total-sents-used",
            get(daily_total_sents_used),
        );

    let swagger = SwaggerUi::new("/api/api-docs")
        .url("/api/api-docs/openapi.json", openapi::ApiDoc::openapi());

    let mut webapp = webapp
        .with_state(AppState::new(config, daos, http_client))
        .merge(swagger);
    for (name, value) in SECURITY_HEADERS {
        webapp = webapp.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }
    webapp
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(VERSION),
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        path = ?request.uri(),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Runs the web server exposing the report API.
#[instrument(skip_all)]
pub async fn run_web_server(config: StatsConfig, daos: Daos) -> Result<(), anyhow::Error> {
    let addr = SocketAddr::new(
        config
            .http_bind_address
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
        config.http_port,
    );
    let webapp = build_webapp(config, daos, appstate::http_client()?);
    let listener = TcpListener::bind(&addr).await?;
    info!("Started web services on {addr}");
    serve(listener, webapp.into_make_service())
        .await
        .map_err(|err| anyhow!("Web server can't be started {err}"))
}
