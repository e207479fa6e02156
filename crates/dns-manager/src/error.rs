use actix_web::{http::StatusCode, HttpResponse, ResponseError};

pub type Result<T> = std::result::Result<T, DnsError>;

#[derive(Debug, thiserror::Error)]
pub enum DnsError {
    #[error("Missing {0}")]
    MissingFields(&'static str),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("DNS provider request failed: {0}")]
    Provider(String),

    #[error("DNS provider returned {status}: {body}")]
    ProviderStatus { status: u16, body: String },
}

impl From<reqwest::Error> for DnsError {
    fn from(err: reqwest::Error) -> Self {
        DnsError::Provider(err.to_string())
    }
}

impl From<serde_json::Error> for DnsError {
    fn from(err: serde_json::Error) -> Self {
        DnsError::Provider(format!("invalid response body: {}", err))
    }
}

// Webhook callers only look at `error`, so the body stays flat.
impl ResponseError for DnsError {
    fn status_code(&self) -> StatusCode {
        match self {
            DnsError::MissingFields(_) | DnsError::InvalidDomain(_) => StatusCode::BAD_REQUEST,
            DnsError::Provider(_) | DnsError::ProviderStatus { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
