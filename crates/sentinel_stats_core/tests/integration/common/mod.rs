
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::Document;
use sentinel_stats_common::config::StatsConfig;
use sentinel_stats_core::{
    build_webapp,
    dao::{Dao, DaoError, Daos},
    query::Pipeline,
};
use tokio::net::TcpListener;

use self::client::TestClient;

/// In-memory collection answering every query with the same canned rows.
///
/// Records what the handlers asked for so tests can inspect it.
pub(crate) struct MockDao {
    rows: Result<Vec<Document>, String>,
    pub pipelines: Mutex<Vec<Vec<Document>>>,
    pub filters: Mutex<Vec<Document>>,
}

impl MockDao {
    pub fn with_rows(rows: Vec<Document>) -> Arc<Self> {
        Arc::new(Self {
            rows: Ok(rows),
            pipelines: Mutex::default(),
            filters: Mutex::default(),
        })
    }

    pub fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            rows: Err(error.into()),
            pipelines: Mutex::default(),
            filters: Mutex::default(),
        })
    }

    fn answer(&self) -> Result<Vec<Document>, DaoError> {
        self.rows.clone().map_err(DaoError::Backend)
    }

    pub fn last_pipeline(&self) -> Vec<Document> {
        self.pipelines.lock().unwrap().last().cloned().unwrap()
    }

    pub fn last_filter(&self) -> Document {
        self.filters.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Dao for MockDao {
    async fn aggregate(&self, pipeline: Pipeline) -> Result<Vec<Document>, DaoError> {
        self.pipelines.lock().unwrap().push(pipeline.into_documents());
        self.answer()
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>, DaoError> {
        self.filters.lock().unwrap().push(filter);
        self.answer()
    }
}

/// Backs every collection with the same mock.
pub(crate) fn mock_daos(dao: Arc<MockDao>) -> Daos {
    Daos {
        sessions: dao.clone(),
        node_statistics: dao.clone(),
        network_statistics: dao.clone(),
        nodes: dao,
    }
}

pub(crate) async fn make_client_with_config(config: StatsConfig, daos: Daos) -> TestClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind ephemeral socket");
    let webapp = build_webapp(config, daos, reqwest::Client::new());
    TestClient::new(webapp, listener)
}

pub(crate) async fn make_client(dao: Arc<MockDao>) -> TestClient {
    make_client_with_config(StatsConfig::new_test_config(), mock_daos(dao)).await
}

/// Every report route with the message it answers on failure.
pub(crate) const REPORTS: [(&str, &str); 18] = [
    ("/api/sessions/daily-stats", "Error while getting daily session count"),
    ("/api/sessions/active-count", "Error while getting active session count"),
    ("/api/sessions/average-count", "Error while getting average session count"),
    ("/api/nodes/total-nodes", "Error while getting total number of nodes"),
    ("/stats/nodes/daily-active", "Error while getting active nodes"),
    ("/stats/nodes/average-nodes", "Error while getting nodes"),
    ("/stats/nodes/daily-stats", "Error while getting daily nodes stats"),
    ("/stats/nodes/active-count", "Error while getting active node count"),
    ("/stats/data/daily-stats", "Error while getting daily stats"),
    ("/stats/data/total-data", "Error while getting total data count"),
    ("/stats/data/last-data", "Error while getting last data"),
    ("/stats/time/daily-stats", "Error while getting time daily stats"),
    ("/stats/time/average-duration", "Error while getting average duration"),
    ("/stats/time/average-daily", "Error while getting daily average duration"),
    ("/stats/time/last-average", "Error while getting last average count"),
    ("/stats/payment/paid-sents-count", "Error while getting daily paid sent count"),
    ("/stats/payment/average-paid-sents", "Error while average paid cents"),
    ("/stats/payment/total-sents-used", "Error while getting total sents used"),
];
