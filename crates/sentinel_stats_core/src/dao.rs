use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::Document,
    error::Error as MongoError,
    Collection, Database,
};
use sentinel_stats_common::config::StatsConfig;
use thiserror::Error;

use crate::query::Pipeline;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error(transparent)]
    Mongo(#[from] MongoError),
    #[error("{0}")]
    Backend(String),
}

/// Read access to one collection.
///
/// Implementations hand the pipeline or filter to the store as-is and return
/// the raw result rows; store errors are passed through unchanged.
#[async_trait]
pub trait Dao: Send + Sync {
    async fn aggregate(&self, pipeline: Pipeline) -> Result<Vec<Document>, DaoError>;

    async fn find(&self, filter: Document) -> Result<Vec<Document>, DaoError>;
}

pub struct MongoDao {
    collection: Collection<Document>,
}

impl MongoDao {
    #[must_use]
    pub fn new(database: &Database, name: &str) -> Self {
        Self {
            collection: database.collection(name),
        }
    }
}

#[async_trait]
impl Dao for MongoDao {
    async fn aggregate(&self, pipeline: Pipeline) -> Result<Vec<Document>, DaoError> {
        debug!(
            "Running aggregation on {} with {} stages",
            self.collection.name(),
            pipeline.stages().len()
        );
        let cursor = self.collection.aggregate(pipeline.into_documents()).await?;
        let rows = cursor.try_collect::<Vec<_>>().await?;
        Ok(rows)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>, DaoError> {
        debug!("Running find on {} with filter {filter}", self.collection.name());
        let cursor = self.collection.find(filter).await?;
        let rows = cursor.try_collect::<Vec<_>>().await?;
        Ok(rows)
    }
}

/// Data access objects for every collection the reports read.
#[derive(Clone)]
pub struct Daos {
    pub sessions: Arc<dyn Dao>,
    pub node_statistics: Arc<dyn Dao>,
    pub network_statistics: Arc<dyn Dao>,
    pub nodes: Arc<dyn Dao>,
}

impl Daos {
    /// Binds DAOs to the collections named in `config`.
    #[must_use]
    pub fn mongo(database: &Database, config: &StatsConfig) -> Self {
        Self {
            sessions: Arc::new(MongoDao::new(database, &config.sessions_collection)),
            node_statistics: Arc::new(MongoDao::new(
                database,
                &config.node_statistics_collection,
            )),
            network_statistics: Arc::new(MongoDao::new(
                database,
                &config.network_statistics_collection,
            )),
            nodes: Arc::new(MongoDao::new(database, &config.nodes_collection)),
        }
    }
}
