use anyhow::Result;
use hill90_core::{ServiceConfig, ServiceError};
use hill90_tests::{test_config, TestContext};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::net::TcpListener;

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("Failed to reserve a port")
}

fn lookup(vars: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
    move |key| vars.get(key).cloned()
}

#[tokio::test]
async fn test_listens_on_configured_port() -> Result<()> {
    let port = free_port();
    let config = ServiceConfig::from_lookup(
        &hill90_api::SERVICE,
        lookup(HashMap::from([
            ("PORT", port.to_string()),
            ("HOST", "127.0.0.1".to_string()),
            ("WORKERS", "1".to_string()),
        ])),
    )?;
    config.validate()?;
    assert_eq!(config.port, port);

    let mut ctx = TestContext::new();
    let addr = ctx.spawn(hill90_api::service(config))?;
    assert_eq!(addr.port(), port);

    let body: Value = ctx.client("api")?.get_json("/health").await?;
    assert_eq!(body["service"], "api");

    ctx.teardown().await
}

#[tokio::test]
async fn test_ephemeral_port_is_reported() -> Result<()> {
    let mut ctx = TestContext::new();
    let addr = ctx.spawn(hill90_mcp::service(test_config(&hill90_mcp::SERVICE)))?;
    assert_ne!(addr.port(), 0);

    let response = ctx.client("mcp")?.get("/health").await?;
    assert_eq!(response.status(), StatusCode::OK);

    ctx.teardown().await
}

#[tokio::test]
async fn test_occupied_port_fails_to_bind() -> Result<()> {
    let occupied = TcpListener::bind("127.0.0.1:0")?;
    let port = occupied.local_addr()?.port();

    let mut config = test_config(&hill90_auth::SERVICE);
    config.port = port;

    match hill90_auth::service(config).bind() {
        Err(ServiceError::Bind { addr, .. }) => {
            assert_eq!(addr, format!("127.0.0.1:{}", port));
        }
        Err(other) => panic!("expected a bind error, got {}", other),
        Ok(_) => panic!("port {} should already be in use", port),
    }

    drop(occupied);
    Ok(())
}
