use anyhow::Context;
use hill90_auth::SERVICE;
use hill90_core::{load_dotenv, init_logging, ConfigLoader, LogConfig, ServiceConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_logging(&LogConfig::from_env()?)?;

    let config = ServiceConfig::load(&SERVICE).context("Invalid Auth service configuration")?;
    tracing::info!("Starting Hill90 Auth service");

    let bound = hill90_auth::service(config)
        .bind()
        .context("Auth service failed to start")?;
    bound.run().await?;

    Ok(())
}
