//! Structured logging setup
//!
//! Services log through `tracing`. Output goes to stdout as JSON by default so
//! container log collectors can parse it; `LOG_FORMAT=pretty` or `compact` is
//! friendlier for local runs. The filter honours `RUST_LOG`, except that the
//! service startup line (target [`STARTUP_TARGET`]) is always emitted.

use crate::config::{non_empty, ConfigLoader};
use crate::error::{Result, ServiceError};
use std::str::FromStr;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Target of the "listening on port" line.
pub const STARTUP_TARGET: &str = "hill90::startup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" | "text" => Ok(LogFormat::Compact),
            other => Err(ServiceError::config(
                format!(
                    "Invalid log format '{}'. Must be one of: json, pretty, compact",
                    other
                ),
                "LOG_FORMAT",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive string, e.g. `info` or `hill90_core=debug,info`
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ConfigLoader for LogConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = non_empty(&lookup, "RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let format = match non_empty(&lookup, "LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self { filter, format })
    }

    fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.filter).map_err(|e| {
            ServiceError::config(format!("Invalid RUST_LOG directive: {}", e), "RUST_LOG")
        })?;
        Ok(())
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns `ServiceError::Logging` if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| ServiceError::Logging(e.to_string()))
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    let filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match format!("{}=info", STARTUP_TARGET).parse::<Directive>() {
        Ok(startup) => filter.add_directive(startup),
        Err(_) => filter,
    }
}
