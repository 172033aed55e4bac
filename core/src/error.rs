//! Error types for the todo API client.
//!
//! # Design
//! There is no variant for non-2xx statuses. A 401, 404 or 500 from the server
//! is an `HttpResponse` like any other and is returned as `Ok`. Only failures
//! to complete the HTTP exchange itself are errors.

/// Client-wide result alias.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by `TodoClient` and its supporting types.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL could not be parsed or cannot carry API paths.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The task id is empty or a dot segment (`.`, `..`), which URL
    /// normalization would resolve to a different route.
    #[error("invalid task id: {0:?}")]
    InvalidTaskId(String),

    /// The request never produced a response: connection refused, DNS
    /// failure, I/O error, invalid header value.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// A payload could not be serialized, or a body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}
