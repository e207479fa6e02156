use anyhow::Context;
use hill90_ai::{cors_config, SERVICE};
use hill90_core::{load_dotenv, init_logging, ConfigLoader, LogConfig, ServiceConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_logging(&LogConfig::from_env()?)?;

    let config = ServiceConfig::load(&SERVICE).context("Invalid AI service configuration")?;
    let cors = cors_config(|key| std::env::var(key).ok());
    cors.validate().context("Invalid CORS configuration")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        allowed_origins = ?cors.allowed_origins,
        "Starting Hill90 AI service"
    );

    hill90_ai::service(config, cors)
        .bind()
        .context("AI service failed to start")?
        .run()
        .await?;

    Ok(())
}
