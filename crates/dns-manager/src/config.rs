//! DNS manager configuration
//!
//! # Environment Variables
//!
//! - `HOSTINGER_API_KEY` (required): bearer token for the Hostinger DNS API
//! - `HOSTINGER_API_BASE` (optional): API root (default: `https://developers.hostinger.com/api/dns/v1`)
//! - `BASE_DOMAIN` (optional): zone managed by this service (default: `hill90.com`)
//! - `DNS_PROPAGATION_WAIT_SECS` (optional): delay after adding a record (default: 30)
//! - `DNS_TXT_TTL` (optional): TTL for challenge records in seconds (default: 300)

use hill90_core::config::{non_empty, parse_var};
use hill90_core::{ConfigLoader, Result, ServiceError};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://developers.hostinger.com/api/dns/v1";
pub const DEFAULT_BASE_DOMAIN: &str = "hill90.com";
pub const DEFAULT_PROPAGATION_WAIT_SECS: u64 = 30;
pub const DEFAULT_TXT_TTL: u32 = 300;

#[derive(Clone, PartialEq, Eq)]
pub struct DnsConfig {
    pub api_key: String,
    pub api_base: String,
    pub base_domain: String,
    pub propagation_wait: Duration,
    pub txt_ttl: u32,
}

impl DnsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
            propagation_wait: Duration::from_secs(DEFAULT_PROPAGATION_WAIT_SECS),
            txt_ttl: DEFAULT_TXT_TTL,
        }
    }
}

// The API key never reaches the logs.
impl fmt::Debug for DnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("base_domain", &self.base_domain)
            .field("propagation_wait", &self.propagation_wait)
            .field("txt_ttl", &self.txt_ttl)
            .finish()
    }
}

impl ConfigLoader for DnsConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(&lookup, "HOSTINGER_API_KEY").ok_or_else(|| {
            ServiceError::config(
                "HOSTINGER_API_KEY environment variable is required",
                "HOSTINGER_API_KEY",
            )
        })?;

        let api_base =
            non_empty(&lookup, "HOSTINGER_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let base_domain = non_empty(&lookup, "BASE_DOMAIN")
            .map(|d| d.trim_matches('.').to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_BASE_DOMAIN.to_string());
        let wait_secs = parse_var(
            &lookup,
            "DNS_PROPAGATION_WAIT_SECS",
            DEFAULT_PROPAGATION_WAIT_SECS,
        )?;
        let txt_ttl = parse_var(&lookup, "DNS_TXT_TTL", DEFAULT_TXT_TTL)?;

        Ok(Self {
            api_key,
            api_base,
            base_domain,
            propagation_wait: Duration::from_secs(wait_secs),
            txt_ttl,
        })
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base).map_err(|e| {
            ServiceError::config(
                format!("Invalid HOSTINGER_API_BASE: {}", e),
                "HOSTINGER_API_BASE",
            )
        })?;

        if self.base_domain.is_empty() || !self.base_domain.contains('.') {
            return Err(ServiceError::config(
                format!("Invalid BASE_DOMAIN '{}'", self.base_domain),
                "BASE_DOMAIN",
            ));
        }

        if self.txt_ttl == 0 {
            return Err(ServiceError::config(
                "DNS_TXT_TTL must be greater than 0 seconds",
                "DNS_TXT_TTL",
            ));
        }

        Ok(())
    }
}
