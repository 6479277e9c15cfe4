use mongodb::bson::{doc, oid::ObjectId, Bson};
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common::{make_client, MockDao};

#[tokio::test]
async fn test_daily_session_count() {
    let dao = MockDao::with_rows(vec![
        doc! { "_id": "2018/03/14", "sessionsCount": 8 },
        doc! { "_id": "2018/03/15", "sessionsCount": 3 },
    ]);
    let client = make_client(dao.clone()).await;

    let response = client.get("/api/sessions/daily-stats").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await;
    assert_eq!(
        body,
        json!({
            "status": true,
            "results": [
                { "_id": "2018/03/14", "sessionsCount": 8 },
                { "_id": "2018/03/15", "sessionsCount": 3 },
            ]
        })
    );

    let pipeline = dao.last_pipeline();
    assert_eq!(pipeline.len(), 3);
    assert!(pipeline[0].contains_key("$project"));
    assert_eq!(
        pipeline[1].get_document("$group").unwrap().get_document("_id").unwrap(),
        &doc! { "$dateToString": { "format": "%Y/%m/%d", "date": "$date" } }
    );
    assert_eq!(pipeline[2], doc! { "$sort": { "_id": 1 } });
}

#[tokio::test]
async fn test_empty_collection() {
    let client = make_client(MockDao::with_rows(Vec::new())).await;

    for path in [
        "/stats/data/daily-stats",
        "/stats/time/average-duration",
        "/stats/payment/total-sents-used",
    ] {
        let response = client.get(path).send().await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await;
        assert_eq!(body, json!({ "status": true, "results": [] }));
    }
}

#[tokio::test]
async fn test_last_day_filter() {
    let dao = MockDao::with_rows(vec![doc! { "_id": Bson::Null, "Total": 1024_i64 }]);
    let client = make_client(dao.clone()).await;

    // last-data always windows, other reports only on request
    let response = client.get("/stats/data/last-data").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await;
    assert_eq!(body["results"], json!([{ "_id": null, "Total": 1024 }]));
    let pipeline = dao.last_pipeline();
    let window = pipeline[0]
        .get_document("$match")
        .unwrap()
        .get_document("start_time")
        .unwrap();
    let since = window.get_i64("$gte").unwrap();
    let until = window.get_i64("$lt").unwrap();
    assert_eq!(until - since, 86_400);

    client.get("/stats/data/total-data").send().await;
    assert!(dao.last_pipeline()[0].contains_key("$group"));

    client
        .get("/stats/data/total-data?filter=lastday")
        .send()
        .await;
    assert!(dao.last_pipeline()[0].contains_key("$match"));
}

#[tokio::test]
async fn test_average_session_count_with_single_timestamp() {
    let dao = MockDao::with_rows(vec![doc! { "Average Sessions": Bson::Null }]);
    let client = make_client(dao.clone()).await;

    let response = client.get("/api/sessions/average-count").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await;
    assert_eq!(body["results"], json!([{ "Average Sessions": null }]));

    let pipeline = dao.last_pipeline();
    assert_eq!(pipeline.len(), 2);
    assert!(pipeline[1]
        .get_document("$project")
        .unwrap()
        .contains_key("Average Sessions"));
}

#[tokio::test]
async fn test_active_session_count() {
    let dao = MockDao::with_rows(vec![
        doc! { "session_name": "a", "start_time": 1_520_000_000_i64, "end_time": Bson::Null },
        doc! { "session_name": "b", "start_time": 1_520_000_100_i64, "end_time": Bson::Null },
    ]);
    let client = make_client(dao.clone()).await;

    let response = client
        .get("/api/sessions/active-count?interval=current&format=count")
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await;
    assert_eq!(body, json!({ "status": true, "results": [{ "count": 2 }] }));
    assert_eq!(dao.last_filter(), doc! { "end_time": Bson::Null });

    let response = client.get("/api/sessions/active-count").send().await;
    let body: Value = response.json().await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["session_name"], "a");
}

#[tokio::test]
async fn test_active_node_count() {
    let dao = MockDao::with_rows(vec![doc! { "account_addr": "sent1", "vpn": { "status": "up" } }]);
    let client = make_client(dao.clone()).await;

    let response = client
        .get("/stats/nodes/active-count?format=count")
        .send()
        .await;
    let body: Value = response.json().await;
    assert_eq!(body["results"], json!([{ "count": 1 }]));
    assert_eq!(dao.last_filter(), doc! { "vpn.status": "up" });
}

#[tokio::test]
async fn test_payment_reports() {
    let dao = MockDao::with_rows(vec![doc! { "_id": "01/05/2018", "sentsCount": 40 }]);
    let client = make_client(dao.clone()).await;

    let response = client.get("/stats/payment/total-sents-used").send().await;
    let body: Value = response.json().await;
    assert_eq!(body["results"], json!([{ "_id": "01/05/2018", "sentsCount": 40 }]));
    let projection = dao.last_pipeline()[0]
        .get_document("$project")
        .unwrap()
        .clone();
    assert_eq!(
        projection.get_document("value").unwrap(),
        &doc! { "$add": ["$paid_count", "$unpaid_count"] }
    );

    let total_used = dao.last_pipeline();

    // the average chart publishes the same daily paid and unpaid sums
    client.get("/stats/payment/average-paid-sents").send().await;
    let average = dao.last_pipeline();
    assert_eq!(average, total_used);
    let group = average[1].get_document("$group").unwrap();
    assert_eq!(
        group.get_document("sentsCount").unwrap(),
        &doc! { "$sum": "$value" }
    );
}

#[tokio::test]
async fn test_active_documents_use_plain_ids() {
    let dao = MockDao::with_rows(vec![doc! {
        "_id": ObjectId::parse_str("5ae7f4a2c1d2e3f4a5b6c7d8").unwrap(),
        "session_name": "a",
        "start_time": 1_520_000_000_i64,
        "end_time": Bson::Null,
    }]);
    let client = make_client(dao).await;

    let response = client.get("/api/sessions/active-count").send().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await;
    assert_eq!(
        body["results"],
        json!([{
            "_id": "5ae7f4a2c1d2e3f4a5b6c7d8",
            "session_name": "a",
            "start_time": 1_520_000_000_i64,
            "end_time": null,
        }])
    );
}
