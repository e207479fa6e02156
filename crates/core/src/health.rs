//! Liveness health check shared by all Hill90 services
//!
//! `GET /health` answers with a fixed body naming the service:
//!
//! ```json
//! {"status":"healthy","service":"api"}
//! ```
//!
//! The check only confirms the process is accepting and answering requests; it
//! does not probe downstream dependencies and never fails.

use crate::service::ServiceDescriptor;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

/// Health status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Body returned by `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            service: service.into(),
        }
    }
}

impl From<&ServiceDescriptor> for HealthResponse {
    fn from(descriptor: &ServiceDescriptor) -> Self {
        Self::healthy(descriptor.name)
    }
}

pub async fn health(descriptor: web::Data<ServiceDescriptor>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::from(descriptor.get_ref()))
}
