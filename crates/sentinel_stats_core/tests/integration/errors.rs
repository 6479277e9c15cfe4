use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common::{make_client, MockDao, REPORTS};

#[tokio::test]
async fn test_store_failure_envelope() {
    let client = make_client(MockDao::failing("connection refused")).await;

    for (path, message) in REPORTS {
        let response = client.get(path).send().await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let body: Value = response.json().await;
        assert_eq!(
            body,
            json!({
                "status": false,
                "message": message,
                "errors": "connection refused",
            }),
            "{path}"
        );
    }
}

#[tokio::test]
async fn test_invalid_query_parameter() {
    let dao = MockDao::with_rows(Vec::new());
    let client = make_client(dao.clone()).await;

    for query in ["interval=week", "filter=yesterday", "format=csv"] {
        let response = client
            .get(format!("/stats/time/daily-stats?{query}"))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await;
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "Invalid query parameter");
    }
    // rejected before reaching the store
    assert!(dao.pipelines.lock().unwrap().is_empty());

    // repeated parameters fail deserialization and still answer the envelope
    let response = client
        .get("/stats/time/daily-stats?filter=day&filter=lastday")
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Invalid query parameter");
    assert!(body["errors"].as_str().unwrap().contains("duplicate field"));
    assert!(dao.pipelines.lock().unwrap().is_empty());

    let response = client
        .get("/stats/time/daily-stats?interval=DAY&filter=LastDay")
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}
