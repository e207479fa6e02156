//! # Hill90 Core
//!
//! Shared building blocks for the Hill90 services.
//!
//! Every service is a small actix-web process with the same shape: read its
//! configuration from the environment, install the common middleware, expose
//! `GET /health`, bind a port and serve. This crate owns that shape so the
//! individual service crates only declare their identity and extra routes.
//!
//! ## Modules
//!
//! - `config`: Environment-backed configuration loading and validation
//! - `error`: Error types and HTTP error responses
//! - `health`: Liveness health check contract
//! - `logging`: Structured logging setup
//! - `middleware`: JSON body parsing, request ids and CORS
//! - `server`: Service bootstrap (build app, bind, serve)
//! - `service`: Service identity

pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod service;

pub use config::{load_dotenv, ConfigLoader, ServiceConfig};
pub use error::{Result, ServiceError};
pub use health::{HealthResponse, HealthStatus};
pub use logging::{init_logging, LogConfig, LogFormat, STARTUP_TARGET};
pub use middleware::{CorsConfig, JsonBody, ParsedJson, RequestIdMiddleware};
pub use server::{build_app, BoundService, RouteConfigurer, ServiceInstance};
pub use service::ServiceDescriptor;
