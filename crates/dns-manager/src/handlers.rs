use crate::config::DnsConfig;
use crate::error::{DnsError, Result};
use crate::provider::DnsProvider;
use actix_web::{web, HttpResponse};
use hill90_core::ParsedJson;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Shared, read-only state for the challenge handlers.
pub struct DnsState {
    pub provider: Arc<dyn DnsProvider>,
    pub base_domain: String,
    pub propagation_wait: Duration,
    pub txt_ttl: u32,
}

impl DnsState {
    pub fn new(provider: Arc<dyn DnsProvider>, config: &DnsConfig) -> Self {
        Self {
            provider,
            base_domain: config.base_domain.clone(),
            propagation_wait: config.propagation_wait,
            txt_ttl: config.txt_ttl,
        }
    }

    /// Record name relative to the zone, e.g.
    /// `_acme-challenge.portainer.hill90.com` -> `_acme-challenge.portainer`.
    ///
    /// A single trailing dot (absolute FQDN) is accepted.
    pub fn record_name<'a>(&self, fqdn: &'a str) -> Result<&'a str> {
        let name = fqdn.strip_suffix('.').unwrap_or(fqdn);

        name.len()
            .checked_sub(self.base_domain.len() + 1)
            .filter(|&split| split > 0)
            .filter(|&split| {
                name.is_char_boundary(split)
                    && name[split..].starts_with('.')
                    && name[split + 1..].eq_ignore_ascii_case(&self.base_domain)
            })
            .map(|split| &name[..split])
            .ok_or_else(|| DnsError::InvalidDomain(fqdn.to_string()))
    }
}

/// `POST /present`: create the `_acme-challenge` TXT record.
pub async fn present(state: web::Data<DnsState>, body: ParsedJson) -> Result<HttpResponse> {
    let (fqdn, value) = match (body.str_field("fqdn"), body.str_field("value")) {
        (Some(fqdn), Some(value)) => (fqdn, value),
        _ => return Err(DnsError::MissingFields("fqdn or value")),
    };
    let record_name = state.record_name(fqdn)?;

    info!(record_name, "Adding TXT record");
    let result = state
        .provider
        .add_txt_record(record_name, value, state.txt_ttl)
        .await
        .inspect_err(|e| error!(record_name, error = %e, "Error adding TXT record"))?;

    if !state.propagation_wait.is_zero() {
        info!(
            wait_secs = state.propagation_wait.as_secs(),
            "Waiting for DNS propagation"
        );
        tokio::time::sleep(state.propagation_wait).await;
    }

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "result": result
    })))
}

/// `POST /cleanup`: remove the `_acme-challenge` TXT record.
pub async fn cleanup(state: web::Data<DnsState>, body: ParsedJson) -> Result<HttpResponse> {
    let fqdn = body
        .str_field("fqdn")
        .ok_or(DnsError::MissingFields("fqdn"))?;
    let record_name = state.record_name(fqdn)?;

    info!(record_name, "Deleting TXT record");
    let result = state
        .provider
        .delete_txt_record(record_name, state.txt_ttl)
        .await
        .inspect_err(|e| error!(record_name, error = %e, "Error deleting TXT record"))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "result": result
    })))
}

pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<DnsState>) {
    cfg.app_data(state)
        .route("/present", web::post().to(present))
        .route("/cleanup", web::post().to(cleanup));
}
