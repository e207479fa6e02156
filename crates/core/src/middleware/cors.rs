use crate::error::{Result, ServiceError};
use actix_cors::Cors;
use url::Url;

const ORIGINS_KEY: &str = "CORS_ALLOWED_ORIGINS";

/// Cross-origin policy for services that are called from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_secs: usize,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
            allow_credentials: true,
            max_age_secs: 3600,
        }
    }

    /// Parse a comma-separated origin list, skipping blanks.
    pub fn from_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty()),
        )
    }

    /// Every entry must be an exact `scheme://host[:port]` origin; wildcards
    /// and paths are rejected.
    pub fn validate(&self) -> Result<()> {
        if self.allowed_origins.is_empty() {
            return Err(ServiceError::config(
                "at least one allowed origin is required",
                ORIGINS_KEY,
            ));
        }

        for origin in &self.allowed_origins {
            let serialized = Some(origin)
                .filter(|origin| !origin.contains('*'))
                .and_then(|origin| Url::parse(origin).ok())
                .filter(|url| matches!(url.scheme(), "http" | "https"))
                .map(|url| url.origin().ascii_serialization());

            if serialized.as_deref() != Some(origin.as_str()) {
                return Err(ServiceError::config(
                    format!("invalid CORS origin '{}'", origin),
                    ORIGINS_KEY,
                ));
            }
        }

        Ok(())
    }

    pub(crate) fn build(&self) -> Cors {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .max_age(self.max_age_secs);

        for origin in &self.allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        if self.allow_credentials {
            cors = cors.supports_credentials();
        }

        cors
    }
}
