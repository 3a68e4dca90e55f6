//! Client error types

use thiserror::Error;

/// Transport and backend error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, DNS, …)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 from the backend; the local session has been invalidated
    #[error("authentication required")]
    Unauthorized,

    /// Non-2xx response; `message` is the backend's own message when it
    /// sent one, and is surfaced verbatim
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// 2xx response with an undecodable body
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Local validation failure, raised before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Persisted-token storage failure
    #[error("token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
