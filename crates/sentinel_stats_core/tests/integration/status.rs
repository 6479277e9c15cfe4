use reqwest::StatusCode;
use sentinel_stats_common::{config::StatsConfig, VERSION};
use sentinel_stats_core::handlers::VERSION_HEADER;
use serde_json::{json, Value};

use crate::common::{make_client, make_client_with_config, mock_daos, MockDao};

#[tokio::test]
async fn test_status_and_health() {
    let mut config = StatsConfig::new_test_config();
    config.http_port = 3100;
    config.environment = "prod".into();
    let client = make_client_with_config(config, mock_daos(MockDao::with_rows(Vec::new()))).await;

    let response = client.get("/").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await;
    assert_eq!(
        body,
        json!({ "status": "Running", "port": 3100, "env": "prod" })
    );

    let response = client.get("/api/health").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await, "alive");
}

#[tokio::test]
async fn test_response_headers() {
    let client = make_client(MockDao::with_rows(Vec::new())).await;

    let response = client
        .get("/stats/nodes/daily-stats")
        .header("origin", "https://stats.sentinel.co")
        .send()
        .await;
    let headers = response.headers();
    assert_eq!(headers[VERSION_HEADER], VERSION);
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_cors_allowed_origin() {
    let mut config = StatsConfig::new_test_config();
    config.cors_allowed_origin = Some("https://stats.sentinel.co".parse().unwrap());
    let client = make_client_with_config(config, mock_daos(MockDao::with_rows(Vec::new()))).await;

    let response = client
        .get("/stats/nodes/daily-stats")
        .header("origin", "https://stats.sentinel.co")
        .send()
        .await;
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://stats.sentinel.co"
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let client = make_client(MockDao::with_rows(Vec::new())).await;

    let response = client.get("/api/api-docs/openapi.json").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await;
    assert_eq!(body["paths"].as_object().unwrap().len(), 18);
}
