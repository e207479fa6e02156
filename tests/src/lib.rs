pub mod client;

pub use client::TestClient;
pub use context::{test_config, RunningService, TestContext};

use hill90_core::ServiceInstance;

/// The four services that take no provider credentials, with test configs.
pub fn stateless_services() -> Vec<ServiceInstance> {
    vec![
        hill90_api::service(test_config(&hill90_api::SERVICE)),
        hill90_auth::service(test_config(&hill90_auth::SERVICE)),
        hill90_ai::service(
            test_config(&hill90_ai::SERVICE),
            hill90_ai::cors_config(|_| None),
        ),
        hill90_mcp::service(test_config(&hill90_mcp::SERVICE)),
    ]
}
