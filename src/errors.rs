use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ProxyError {
    AuthenticationError(String),
    ValidationError(String),
    UpstreamError { status: Option<u16>, message: String },
    ParseError(String),
    ConfigError(String),
    NetworkError(String),
}

impl ProxyError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        ProxyError::UpstreamError {
            status,
            message: message.into(),
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ProxyError::AuthenticationError(_) | ProxyError::ValidationError(_) => {
                "invalid_request_error"
            }
            ProxyError::UpstreamError { .. }
            | ProxyError::ParseError(_)
            | ProxyError::NetworkError(_) => "upstream_error",
            ProxyError::ConfigError(_) => "internal_server_error",
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ProxyError::AuthenticationError(_) => "invalid_api_key",
            ProxyError::ValidationError(_) => "invalid_request",
            ProxyError::UpstreamError { .. } => "upstream_failure",
            ProxyError::ParseError(_) => "invalid_upstream_response",
            ProxyError::ConfigError(_) => "configuration_error",
            ProxyError::NetworkError(_) => "upstream_unreachable",
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::AuthenticationError(msg) => write!(f, "Authentication error: {}", msg),
            ProxyError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ProxyError::UpstreamError {
                status: Some(status),
                message,
            } => write!(f, "Upstream error: status {}, {}", status, message),
            ProxyError::UpstreamError {
                status: None,
                message,
            } => write!(f, "Upstream error: {}", message),
            ProxyError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ProxyError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            ProxyError::NetworkError(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for ProxyError {}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::ParseError(err.to_string())
    }
}

impl From<clap::Error> for ProxyError {
    fn from(err: clap::Error) -> Self {
        ProxyError::ConfigError(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    message: String,
    #[serde(rename = "type")]
    kind: &'a str,
    param: Option<&'a str>,
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorDetail<'a>,
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::AuthenticationError(_) => StatusCode::BAD_REQUEST,
            ProxyError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamError { status, .. } => status
                .and_then(|status| StatusCode::from_u16(status).ok())
                .filter(|status| status.is_client_error() || status.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ProxyError::ParseError(_) => StatusCode::BAD_GATEWAY,
            ProxyError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::NetworkError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ProxyError::AuthenticationError(msg)
            | ProxyError::ValidationError(msg)
            | ProxyError::ParseError(msg)
            | ProxyError::ConfigError(msg)
            | ProxyError::NetworkError(msg) => msg.clone(),
            ProxyError::UpstreamError { message, .. } => message.clone(),
        };

        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            error: ErrorDetail {
                message,
                kind: self.error_type(),
                param: None,
                code: self.error_code(),
            },
        })
    }
}
