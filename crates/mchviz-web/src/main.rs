//! mchviz web server
//!
//! Run with: DATA_DIR=/path/to/datasets cargo run -p mchviz-web

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mchviz_common::UnavailableContent;
use mchviz_config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting mchviz web server...");

    let config = Config::load()?;
    info!(data_dir = %config.data_dir.display(), "configuration loaded");

    mchviz_web::server::serve(config, Arc::new(UnavailableContent)).await
}
