use anyhow::Result;
use hill90_dns_manager::{DnsConfig, HostingerClient, SERVICE};
use hill90_tests::{test_config, TestContext};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start(upstream: &MockServer) -> Result<TestContext> {
    let mut dns = DnsConfig::new("e2e-key");
    dns.api_base = format!("{}/api/dns/v1", upstream.uri());
    dns.propagation_wait = Duration::ZERO;

    let provider = Arc::new(HostingerClient::new(&dns)?);
    let mut ctx = TestContext::new();
    ctx.spawn(hill90_dns_manager::service(
        test_config(&SERVICE),
        &dns,
        provider,
    ))?;
    Ok(ctx)
}

#[tokio::test]
async fn test_challenge_lifecycle() -> Result<()> {
    let upstream = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/dns/v1/zones/hill90.com"))
        .and(header("authorization", "Bearer e2e-key"))
        .and(body_partial_json(json!({
            "zone": [{"name": "_acme-challenge.grafana", "records": [{"content": "abc"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Request accepted"})))
        .expect(1)
        .mount(&upstream)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/dns/v1/zones/hill90.com"))
        .and(body_partial_json(json!({"overwrite": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Request accepted"})))
        .expect(1)
        .mount(&upstream)
        .await;

    let ctx = start(&upstream).await?;
    let client = ctx.client("dns-manager")?;

    let response = client
        .post(
            "/present",
            &json!({"fqdn": "_acme-challenge.grafana.hill90.com", "value": "abc"}),
        )
        .await?;
    let response = client.expect_status(response, StatusCode::OK).await?;
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({"status": "success", "result": {"message": "Request accepted"}})
    );

    let response = client
        .post("/cleanup", &json!({"fqdn": "_acme-challenge.grafana.hill90.com"}))
        .await?;
    client.expect_status(response, StatusCode::OK).await?;

    ctx.teardown().await
}

#[tokio::test]
async fn test_provider_rejection_is_reported() -> Result<()> {
    let upstream = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated"))
        .mount(&upstream)
        .await;

    let ctx = start(&upstream).await?;
    let client = ctx.client("dns-manager")?;

    let response = client
        .post(
            "/present",
            &json!({"fqdn": "_acme-challenge.hill90.com", "value": "abc"}),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await?;
    assert_eq!(body["error"], "DNS provider returned 401: Unauthenticated");

    // Still serving
    let health: Value = client.get_json("/health").await?;
    assert_eq!(health, json!({"status": "healthy", "service": "dns-manager"}));

    ctx.teardown().await
}

#[tokio::test]
async fn test_bad_requests_never_reach_provider() -> Result<()> {
    let upstream = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let ctx = start(&upstream).await?;
    let client = ctx.client("dns-manager")?;

    let response = client
        .post("/present", &json!({"fqdn": "_acme-challenge.example.com", "value": "abc"}))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.post("/cleanup", &json!({})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post_raw("/present", "application/json", "not json")
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.teardown().await
}
