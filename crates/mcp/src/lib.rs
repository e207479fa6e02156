//! Hill90 MCP Gateway
//!
//! Default port: 8001

use hill90_core::{ServiceConfig, ServiceDescriptor, ServiceInstance};

pub const SERVICE: ServiceDescriptor = ServiceDescriptor::new("mcp", "MCP", 8001);

pub fn service(config: ServiceConfig) -> ServiceInstance {
    ServiceInstance::new(SERVICE, config)
}
