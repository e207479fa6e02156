//! Hill90 API Service
//!
//! Default port: 3000

use hill90_core::{ServiceConfig, ServiceDescriptor, ServiceInstance};

pub const SERVICE: ServiceDescriptor = ServiceDescriptor::new("api", "API", 3000);

pub fn service(config: ServiceConfig) -> ServiceInstance {
    ServiceInstance::new(SERVICE, config)
}
