//! # Hill90 DNS Manager
//!
//! Webhook used by Traefik's DNS-01 ACME challenge. Traefik calls
//! `POST /present` before validation and `POST /cleanup` afterwards; both
//! manage `_acme-challenge` TXT records in the Hostinger zone for the base
//! domain.
//!
//! Default port: 8080

pub mod config;
pub mod error;
pub mod handlers;
pub mod provider;

pub use config::DnsConfig;
pub use error::{DnsError, Result};
pub use handlers::{cleanup, present, DnsState};
pub use provider::{DnsProvider, HostingerClient, ZoneUpdate};

use actix_web::web;
use hill90_core::{ServiceConfig, ServiceDescriptor, ServiceInstance};
use std::sync::Arc;

pub const SERVICE: ServiceDescriptor = ServiceDescriptor::new("dns-manager", "DNS Manager", 8080);

pub fn service(
    config: ServiceConfig,
    dns: &DnsConfig,
    provider: Arc<dyn DnsProvider>,
) -> ServiceInstance {
    let state = web::Data::new(DnsState::new(provider, dns));

    ServiceInstance::new(SERVICE, config)
        .with_routes(move |cfg| handlers::configure(cfg, state.clone()))
}
