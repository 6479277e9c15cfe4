use mongodb::{
    bson::doc,
    error::Error as MongoError,
    options::ClientOptions,
    Client, Database,
};
use tracing::info;

pub mod models;

/// Connects to MongoDB and verifies the deployment answers a `ping`.
/// Returns a handle to the configured database.
pub async fn init_db(url: &str, name: &str) -> Result<Database, MongoError> {
    info!("Initializing MongoDB client");
    let mut options = ClientOptions::parse(url).await?;
    options.app_name = Some("sentinel-stats".into());
    let client = Client::with_options(options)?;
    let database = client.database(name);
    database.run_command(doc! { "ping": 1 }).await?;
    info!("Connected to MongoDB database {name}");
    Ok(database)
}
