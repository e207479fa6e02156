//! MCP Gateway binary

use anyhow::Context;
use hill90_core::{load_dotenv, init_logging, ConfigLoader, LogConfig, ServiceConfig};
use hill90_mcp::SERVICE;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_logging(&LogConfig::from_env()?)?;

    let config = ServiceConfig::load(&SERVICE).context("Invalid MCP gateway configuration")?;
    tracing::info!("Starting Hill90 MCP gateway");

    hill90_mcp::service(config)
        .bind()
        .context("MCP gateway failed to start")?
        .run()
        .await?;

    Ok(())
}
