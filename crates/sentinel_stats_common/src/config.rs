use std::net::IpAddr;

use clap::Parser;
use reqwest::{header::HeaderValue, Url};
use secrecy::SecretString;

#[derive(Clone, Parser, Debug)]
#[command(version, about = "Usage statistics API for the Sentinel dVPN network")]
#[cfg_attr(test, command(ignore_errors(true)))]
pub struct StatsConfig {
    #[arg(long, env = "SENTINEL_STATS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Deployment name reported by the status endpoint.
    #[arg(long, env = "SENTINEL_STATS_ENV", default_value = "dev")]
    pub environment: String,

    #[arg(
        long,
        env = "SENTINEL_STATS_DB_URL",
        default_value = "mongodb://localhost:27017"
    )]
    pub database_url: SecretString,

    #[arg(long, env = "SENTINEL_STATS_DB_NAME", default_value = "sentinel")]
    pub database_name: String,

    #[arg(
        long,
        env = "SENTINEL_STATS_SESSIONS_COLLECTION",
        default_value = "connections"
    )]
    pub sessions_collection: String,

    #[arg(
        long,
        env = "SENTINEL_STATS_NODE_STATISTICS_COLLECTION",
        default_value = "statistics"
    )]
    pub node_statistics_collection: String,

    // the collector writes token counters into the same documents as node counters
    #[arg(
        long,
        env = "SENTINEL_STATS_NETWORK_STATISTICS_COLLECTION",
        default_value = "statistics"
    )]
    pub network_statistics_collection: String,

    #[arg(long, env = "SENTINEL_STATS_NODES_COLLECTION", default_value = "nodes")]
    pub nodes_collection: String,

    #[arg(long, env = "SENTINEL_STATS_HTTP_PORT", default_value_t = 3000)]
    pub http_port: u16,

    #[arg(long, env = "SENTINEL_STATS_HTTP_BIND_ADDRESS")]
    pub http_bind_address: Option<IpAddr>,

    /// When set, the active session count is relayed from this URL instead of
    /// being computed from the sessions collection.
    #[arg(long, env = "SENTINEL_STATS_ACTIVE_SESSIONS_URL", value_parser = Url::parse)]
    pub active_sessions_url: Option<Url>,

    /// Allowed CORS origin. Any origin is allowed when unset.
    #[arg(
        long,
        env = "SENTINEL_STATS_CORS_ALLOWED_ORIGIN",
        value_parser = HeaderValue::from_str
    )]
    pub cors_allowed_origin: Option<HeaderValue>,
}

impl StatsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::parse()
    }

    // avoids `cargo test` args being captured by `clap`
    #[must_use]
    pub fn new_test_config() -> Self {
        Self::parse_from::<[_; 0], String>([])
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::new()
    }
}
