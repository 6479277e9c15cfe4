use secrecy::ExposeSecret;
use sentinel_stats_common::{config::StatsConfig, db::init_db, VERSION};
use sentinel_stats_core::{dao::Daos, run_web_server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[macro_use]
extern crate tracing;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    if dotenvy::from_filename(".env.local").is_err() {
        dotenvy::dotenv().ok();
    }
    let config = StatsConfig::new();
    // initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},mongodb=warn", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sentinel-stats version v{VERSION}");
    debug!("Using config: {config:?}");

    let database = init_db(config.database_url.expose_secret(), &config.database_name).await?;
    let daos = Daos::mongo(&database, &config);

    run_web_server(config, daos).await
}
