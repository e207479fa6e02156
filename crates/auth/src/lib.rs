//! Hill90 Auth Service
//!
//! Default port: 3001. Only the shared health contract is served for now.

use hill90_core::{ServiceConfig, ServiceDescriptor, ServiceInstance};

pub const SERVICE: ServiceDescriptor = ServiceDescriptor::new("auth", "Auth", 3001);

pub fn service(config: ServiceConfig) -> ServiceInstance {
    ServiceInstance::new(SERVICE, config)
}
