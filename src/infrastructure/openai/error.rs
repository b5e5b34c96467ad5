use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors that can occur when interacting with the chat-completions API.
#[derive(Error, Debug)]
pub enum OpenAiApiError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or missing API key (HTTP 401)
    #[error("Invalid API key - authentication failed")]
    InvalidApiKey,

    /// Forbidden - permission denied (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Model or endpoint not found (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from the provider (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Unknown or unexpected error
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl OpenAiApiError {
    /// Returns true if this error is transient and should be retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OpenAiApiError::RateLimitExceeded
                | OpenAiApiError::ServerError(_, _)
                | OpenAiApiError::NetworkError(_)
        )
    }

    /// Classify an HTTP error status into a typed error.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => OpenAiApiError::InvalidRequest(body),
            StatusCode::UNAUTHORIZED => OpenAiApiError::InvalidApiKey,
            StatusCode::FORBIDDEN => OpenAiApiError::Forbidden(body),
            StatusCode::NOT_FOUND => OpenAiApiError::NotFound,
            StatusCode::TOO_MANY_REQUESTS => OpenAiApiError::RateLimitExceeded,
            status if status.is_server_error() => OpenAiApiError::ServerError(status, body),
            status => OpenAiApiError::UnknownError(status, body),
        }
    }
}

impl From<OpenAiApiError> for DomainError {
    fn from(err: OpenAiApiError) -> Self {
        DomainError::ServiceUnavailable(err.to_string())
    }
}
