use actix_web::{http::StatusCode, HttpResponse, ResponseError};

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors raised while configuring, binding or serving a Hill90 service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        key: Option<String>,
    },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Request body exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    Payload(String),
}

impl ServiceError {
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        ServiceError::Configuration {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ServiceError::InvalidJson(_) => "invalid_json",
            ServiceError::PayloadTooLarge { .. } => "payload_too_large",
            ServiceError::Payload(_) => "invalid_request",
            _ => "server_error",
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidJson(_) | ServiceError::Payload(_) => StatusCode::BAD_REQUEST,
            ServiceError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let description = if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.error_code(),
            "error_description": description
        }))
    }
}
