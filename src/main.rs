use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_catalog::api::create_api_router;
use rust_catalog::config::Config;
use rust_catalog::entities::{connect, setup_schema};
use rust_catalog::seed::seed_catalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let db = connect(&config).await?;
    setup_schema(&db).await?;

    if config.seed_products > 0 {
        seed_catalog(&db, config.seed_products).await?;
    }

    let shared_db = Arc::new(db);
    let app = create_api_router(shared_db);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Catalog service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
