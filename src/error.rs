use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed upstream response: {0}")]
    Malformed(String),
    #[error("upstream returned no choices")]
    EmptyChoices,
}

impl UpstreamError {
    pub fn code(&self) -> &'static str {
        match self {
            UpstreamError::Unreachable(_) => "UPSTREAM_UNREACHABLE",
            UpstreamError::Status { .. } => "UPSTREAM_ERROR",
            UpstreamError::Malformed(_) | UpstreamError::EmptyChoices => "UPSTREAM_MALFORMED",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MISTRAL_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: &'static str,
    pub request_id: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub detail: String,
    pub request_id: String,
}

impl AppError {
    pub fn new(status: StatusCode, code: &'static str, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            status,
            code,
            detail: detail.into(),
            request_id: request_id.into(),
        }
    }

    pub fn validation(status: StatusCode, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(status, "VALIDATION_ERROR", detail, request_id)
    }

    pub fn upstream(err: UpstreamError, request_id: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.code(), err.to_string(), request_id)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            detail: self.detail,
            code: self.code,
            request_id: self.request_id,
        };
        (self.status, Json(payload)).into_response()
    }
}
