//! API Service - Hill90 public API entry point

use anyhow::Context;
use hill90_api::SERVICE;
use hill90_core::{load_dotenv, init_logging, ConfigLoader, LogConfig, ServiceConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_logging(&LogConfig::from_env()?)?;

    let config = ServiceConfig::load(&SERVICE).context("Invalid API service configuration")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Hill90 API service"
    );

    hill90_api::service(config)
        .bind()
        .context("API service failed to start")?
        .run()
        .await?;

    Ok(())
}
