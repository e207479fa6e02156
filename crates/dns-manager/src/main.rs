//! DNS Manager binary
//!
//! Fails fast when `HOSTINGER_API_KEY` is missing.

use anyhow::Context;
use hill90_core::{load_dotenv, init_logging, ConfigLoader, LogConfig, ServiceConfig};
use hill90_dns_manager::{DnsConfig, HostingerClient, SERVICE};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_logging(&LogConfig::from_env()?)?;

    let config = ServiceConfig::load(&SERVICE).context("Invalid DNS manager configuration")?;
    let dns = DnsConfig::from_env().context("Invalid Hostinger configuration")?;
    dns.validate().context("Invalid Hostinger configuration")?;

    info!(
        base_domain = %dns.base_domain,
        api_base = %dns.api_base,
        propagation_wait_secs = dns.propagation_wait.as_secs(),
        "Starting Hill90 DNS manager"
    );

    let provider = Arc::new(HostingerClient::new(&dns).context("Failed to build HTTP client")?);

    hill90_dns_manager::service(config, &dns, provider)
        .bind()
        .context("DNS manager failed to start")?
        .run()
        .await?;

    Ok(())
}
