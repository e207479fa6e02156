//! DNS provider seam and the Hostinger implementation
//!
//! Hostinger has no per-record delete, so clearing a challenge record is an
//! update with an empty record set and `overwrite: true`.

use crate::config::DnsConfig;
use crate::error::{DnsError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Manages TXT records in a single DNS zone.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create or replace the TXT record `name` with `value`.
    async fn add_txt_record(&self, name: &str, value: &str, ttl: u32) -> Result<Value>;

    /// Remove every value of the TXT record `name`.
    async fn delete_txt_record(&self, name: &str, ttl: u32) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneUpdate {
    pub zone: Vec<ZoneRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub records: Vec<RecordContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordContent {
    pub content: String,
}

impl ZoneUpdate {
    pub fn add_txt(name: &str, value: &str, ttl: u32) -> Self {
        Self {
            zone: vec![ZoneRecord {
                name: name.to_string(),
                record_type: "TXT".to_string(),
                ttl,
                records: vec![RecordContent {
                    content: value.to_string(),
                }],
            }],
            overwrite: None,
        }
    }

    pub fn clear_txt(name: &str, ttl: u32) -> Self {
        Self {
            zone: vec![ZoneRecord {
                name: name.to_string(),
                record_type: "TXT".to_string(),
                ttl,
                records: Vec::new(),
            }],
            overwrite: Some(true),
        }
    }
}

/// Hostinger DNS API client
pub struct HostingerClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    domain: String,
}

impl HostingerClient {
    pub fn new(config: &DnsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            domain: config.base_domain.clone(),
        })
    }

    pub fn zone_url(&self) -> String {
        format!("{}/zones/{}", self.api_base, self.domain)
    }

    async fn update_zone(&self, update: &ZoneUpdate) -> Result<Value> {
        let url = self.zone_url();
        debug!(url = %url, "Updating DNS zone");

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_key)
            .json(update)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DnsError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DnsProvider for HostingerClient {
    async fn add_txt_record(&self, name: &str, value: &str, ttl: u32) -> Result<Value> {
        self.update_zone(&ZoneUpdate::add_txt(name, value, ttl))
            .await
    }

    async fn delete_txt_record(&self, name: &str, ttl: u32) -> Result<Value> {
        self.update_zone(&ZoneUpdate::clear_txt(name, ttl)).await
    }
}
