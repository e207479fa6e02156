//! Hill90 AI Service
//!
//! Default port: 8000. Called from the browser, so it carries a CORS policy.

use actix_web::{web, HttpResponse};
use hill90_core::{
    config::non_empty, CorsConfig, ServiceConfig, ServiceDescriptor, ServiceInstance,
};
use serde::{Deserialize, Serialize};

pub const SERVICE: ServiceDescriptor = ServiceDescriptor::new("ai", "AI", 8000);

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is not set
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["https://hill90.com", "https://api.hill90.com"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: "Hill90 AI Service".to_string(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root));
}

/// CORS policy from `CORS_ALLOWED_ORIGINS` (comma-separated) or the defaults.
pub fn cors_config<F>(lookup: F) -> CorsConfig
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(&lookup, "CORS_ALLOWED_ORIGINS") {
        Some(list) => CorsConfig::from_list(&list),
        None => CorsConfig::new(DEFAULT_ALLOWED_ORIGINS),
    }
}

pub fn service(config: ServiceConfig, cors: CorsConfig) -> ServiceInstance {
    ServiceInstance::new(SERVICE, config)
        .with_routes(configure)
        .with_cors(cors)
}
