use std::sync::Arc;

use reqwest::Client;
use sentinel_stats_common::{config::StatsConfig, VERSION};

use crate::dao::Daos;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StatsConfig>,
    pub daos: Daos,
    pub http_client: Client,
}

impl AppState {
    #[must_use]
    pub fn new(config: StatsConfig, daos: Daos, http_client: Client) -> Self {
        Self {
            config: Arc::new(config),
            daos,
            http_client,
        }
    }
}

/// HTTP client used to relay requests to upstream services.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("sentinel-stats/{VERSION}"))
        .build()
}
