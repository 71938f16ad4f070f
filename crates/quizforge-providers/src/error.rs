//! Provider error types.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid or missing API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The API answered successfully but without any text.
    #[error("provider returned an empty reply")]
    EmptyReply,

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl ProviderError {
    /// Map a non-success HTTP status to an error.
    ///
    /// `retry_after_secs` is the parsed `retry-after` header, if any.
    pub fn from_status(
        status: u16,
        body: String,
        model: &str,
        retry_after_secs: Option<u64>,
    ) -> Self {
        match status {
            429 => ProviderError::RateLimited {
                retry_after_ms: retry_after_secs.unwrap_or(5) * 1000,
            },
            401 | 403 => ProviderError::AuthenticationFailed(body),
            404 => ProviderError::ModelNotFound(model.to_string()),
            _ => ProviderError::ApiError {
                status,
                message: body,
            },
        }
    }

    /// Map a transport-level reqwest failure.
    pub fn from_transport(e: &reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(timeout_secs)
        } else {
            ProviderError::NetworkError(e.to_string())
        }
    }
}

/// Extract the `retry-after` header in seconds.
pub(crate) fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}
