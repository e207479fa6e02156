use anyhow::Result;
use futures_util::future::join_all;
use hill90_core::HealthResponse;
use hill90_tests::{stateless_services, TestContext};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn start_all() -> Result<TestContext> {
    let mut ctx = TestContext::new();
    for instance in stateless_services() {
        ctx.spawn(instance)?;
    }
    Ok(ctx)
}

#[tokio::test]
async fn test_every_service_reports_healthy() -> Result<()> {
    let ctx = start_all().await?;

    for service in ctx.services() {
        let response = service.client().get("/health").await?;
        assert_eq!(response.status(), StatusCode::OK, "{}", service.name);
        assert!(response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json")));

        let body: Value = response.json().await?;
        assert_eq!(body, json!({"status": "healthy", "service": service.name}));
    }

    ctx.teardown().await
}

#[tokio::test]
async fn test_health_deserializes_into_contract_type() -> Result<()> {
    let ctx = start_all().await?;

    let health: HealthResponse = ctx.client("auth")?.get_json("/health").await?;
    assert_eq!(health, HealthResponse::healthy("auth"));

    ctx.teardown().await
}

#[tokio::test]
async fn test_concurrent_health_checks() -> Result<()> {
    let ctx = start_all().await?;
    let client = ctx.client("api")?;

    let responses = join_all((0..50).map(|_| client.get("/health"))).await;
    for response in responses {
        let response = response?;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await?;
        assert_eq!(body["status"], "healthy");
    }

    ctx.teardown().await
}

#[tokio::test]
async fn test_service_survives_malformed_json() -> Result<()> {
    let ctx = start_all().await?;

    for service in ctx.services() {
        let client = service.client();
        let response = client
            .post_raw("/health", "application/json", "{\"broken\":")
            .await?;
        assert!(
            response.status().is_client_error(),
            "{} returned {}",
            service.name,
            response.status()
        );

        let health: Value = client.get_json("/health").await?;
        assert_eq!(health["status"], "healthy");
    }

    ctx.teardown().await
}

#[tokio::test]
async fn test_unknown_path_is_not_success() -> Result<()> {
    let ctx = start_all().await?;

    for service in ctx.services() {
        let response = service.client().get("/unknown").await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", service.name);
    }

    ctx.teardown().await
}

#[tokio::test]
async fn test_request_id_is_echoed() -> Result<()> {
    let ctx = start_all().await?;
    let base = ctx.service("mcp")?.url();

    let response = reqwest::Client::new()
        .get(format!("{}/health", base))
        .header("x-request-id", "e2e-request-1")
        .send()
        .await?;

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("e2e-request-1")
    );

    ctx.teardown().await
}

#[tokio::test]
async fn test_ai_root_over_socket() -> Result<()> {
    let ctx = start_all().await?;

    let body: Value = ctx.client("ai")?.get_json("/").await?;
    assert_eq!(body, json!({"message": "Hill90 AI Service"}));

    ctx.teardown().await
}
