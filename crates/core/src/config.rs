//! Shared configuration loader for Hill90 services
//!
//! Every service reads its settings once at startup into a plain struct which is
//! then passed by value into the bootstrap. Values come from the process
//! environment (optionally seeded from a `.env` file via dotenvy).
//!
//! Parsing goes through a lookup function rather than `std::env` directly so the
//! same code path can be exercised in tests without mutating the process
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use hill90_core::config::{load_dotenv, ServiceConfig};
//! use hill90_core::ServiceDescriptor;
//!
//! const API: ServiceDescriptor = ServiceDescriptor::new("api", "API", 3000);
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! load_dotenv();
//! let config = ServiceConfig::load(&API)?;
//! assert!(config.port > 0);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, ServiceError};
use crate::middleware::DEFAULT_JSON_BODY_LIMIT;
use crate::service::ServiceDescriptor;
use std::time::Duration;
use tracing::warn;

/// Default graceful shutdown timeout in seconds
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Configuration loader trait
///
/// Implemented by configuration structs that can be built from a key lookup and
/// validated before use.
pub trait ConfigLoader: Sized {
    /// Build the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if a required key is missing or a value
    /// cannot be parsed.
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>;

    /// Validate configuration values.
    fn validate(&self) -> Result<()>;

    /// Build the configuration from the process environment.
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// HTTP service configuration
///
/// # Environment Variables
///
/// - `PORT` (optional): listen port, falls back to the service default when unset
///   or unparseable
/// - `HOST` (optional): bind host (default: "0.0.0.0")
/// - `WORKERS` (optional): worker threads (default: CPU count)
/// - `JSON_BODY_LIMIT` (optional): maximum JSON body size in bytes (default: 102400)
/// - `SHUTDOWN_TIMEOUT` (optional): graceful shutdown timeout in seconds (default: 30)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service bind host
    pub host: String,
    /// Service bind port
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Maximum accepted JSON body size in bytes
    pub json_body_limit: usize,
    /// Time allowed for in-flight requests to finish on shutdown
    pub shutdown_timeout: Duration,
}

impl ServiceConfig {
    /// Defaults for the given service.
    pub fn for_service(descriptor: &ServiceDescriptor) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: descriptor.default_port,
            workers: num_cpus::get(),
            json_body_limit: DEFAULT_JSON_BODY_LIMIT,
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }

    /// Read the environment and validate the result.
    pub fn load(descriptor: &ServiceDescriptor) -> Result<Self> {
        let config = Self::from_env(descriptor)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env(descriptor: &ServiceDescriptor) -> Result<Self> {
        Self::from_lookup(descriptor, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(descriptor: &ServiceDescriptor, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::for_service(descriptor);

        let port = match non_empty(&lookup, "PORT") {
            None => defaults.port,
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|e| {
                warn!(
                    service = descriptor.name,
                    value = %raw,
                    error = %e,
                    default_port = defaults.port,
                    "Unparseable PORT, falling back to default"
                );
                defaults.port
            }),
        };

        let host = non_empty(&lookup, "HOST").unwrap_or(defaults.host);
        let workers = parse_var(&lookup, "WORKERS", defaults.workers)?;
        let json_body_limit = parse_var(&lookup, "JSON_BODY_LIMIT", defaults.json_body_limit)?;
        let shutdown_secs = parse_var(
            &lookup,
            "SHUTDOWN_TIMEOUT",
            defaults.shutdown_timeout.as_secs(),
        )?;

        Ok(Self {
            host,
            port,
            workers,
            json_body_limit,
            shutdown_timeout: Duration::from_secs(shutdown_secs),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ServiceError::config("port must be greater than 0", "PORT"));
        }

        if self.host.trim().is_empty() {
            return Err(ServiceError::config("host must not be empty", "HOST"));
        }

        if self.workers == 0 {
            return Err(ServiceError::config(
                "workers must be greater than 0",
                "WORKERS",
            ));
        }

        if self.json_body_limit == 0 {
            return Err(ServiceError::config(
                "json_body_limit must be greater than 0 bytes",
                "JSON_BODY_LIMIT",
            ));
        }

        if self.shutdown_timeout.as_secs() == 0 {
            return Err(ServiceError::config(
                "shutdown_timeout must be greater than 0 seconds",
                "SHUTDOWN_TIMEOUT",
            ));
        }

        Ok(())
    }

    /// `host:port` string used for binding and error messages.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Look up `key`, treating blank values as unset.
pub fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String> + ?Sized,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `key` into `T`, returning `default` when it is unset.
///
/// # Errors
///
/// Returns a `Configuration` error if the value is present but cannot be parsed.
pub fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String> + ?Sized,
{
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(v) => v
            .parse::<T>()
            .map_err(|e| ServiceError::config(format!("Failed to parse {}: {}", key, e), key)),
    }
}

/// Load .env file if present
///
/// Missing files are ignored; any other failure is reported on stderr because
/// logging is not initialised yet at this point.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}
